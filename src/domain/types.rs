// ==========================================
// 出口预算表 - 领域类型定义
// ==========================================
// 贸易术语 / 支付方式 / 运输要求 / 币种
// 枚举取值与业务表单一致，解析失败由调用方转换为 InvalidInput
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 贸易术语 (Incoterms)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeTerm {
    Exw,
    Fca,
    Fas,
    Fob,
    Cfr,
    Cif,
    Cip,
    Dap,
    Dpu,
    Ddp,
}

impl TradeTerm {
    pub const ALL: [TradeTerm; 10] = [
        TradeTerm::Exw,
        TradeTerm::Fca,
        TradeTerm::Fas,
        TradeTerm::Fob,
        TradeTerm::Cfr,
        TradeTerm::Cif,
        TradeTerm::Cip,
        TradeTerm::Dap,
        TradeTerm::Dpu,
        TradeTerm::Ddp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeTerm::Exw => "EXW",
            TradeTerm::Fca => "FCA",
            TradeTerm::Fas => "FAS",
            TradeTerm::Fob => "FOB",
            TradeTerm::Cfr => "CFR",
            TradeTerm::Cif => "CIF",
            TradeTerm::Cip => "CIP",
            TradeTerm::Dap => "DAP",
            TradeTerm::Dpu => "DPU",
            TradeTerm::Ddp => "DDP",
        }
    }

    /// 出口方是否办理出口报关（EXW 由买方自行报关）
    pub fn requires_export_clearance(&self) -> bool {
        !matches!(self, TradeTerm::Exw)
    }

    /// 出口方是否承担货运保险
    pub fn seller_insures(&self) -> bool {
        matches!(
            self,
            TradeTerm::Cif | TradeTerm::Cip | TradeTerm::Dap | TradeTerm::Dpu | TradeTerm::Ddp
        )
    }
}

impl fmt::Display for TradeTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TradeTerm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        TradeTerm::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| format!("未知贸易术语: {}", s.trim()))
    }
}

// ==========================================
// 支付方式 (Payment Method)
// ==========================================
// 银行费用按支付方式区分:
// - 托收 (D/P, D/A)
// - 信用证 (名称中含 "L/C")
// - 其余不收银行费用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "T/T")]
    TelegraphicTransfer,
    #[serde(rename = "L/C")]
    LetterOfCredit,
    #[serde(rename = "D/P")]
    DocumentsAgainstPayment,
    #[serde(rename = "D/A")]
    DocumentsAgainstAcceptance,
    #[serde(rename = "T/T+LC")]
    TransferPlusCredit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::TelegraphicTransfer => "T/T",
            PaymentMethod::LetterOfCredit => "L/C",
            PaymentMethod::DocumentsAgainstPayment => "D/P",
            PaymentMethod::DocumentsAgainstAcceptance => "D/A",
            PaymentMethod::TransferPlusCredit => "T/T+LC",
        }
    }

    /// 跟单托收（D/P、D/A）
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            PaymentMethod::DocumentsAgainstPayment | PaymentMethod::DocumentsAgainstAcceptance
        )
    }

    /// 信用证：按代码子串 "L/C" 判定
    ///
    /// 注意 "T/T+LC" 不含 "L/C"，不按信用证收费
    pub fn is_letter_of_credit(&self) -> bool {
        self.as_str().contains("L/C")
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "T/T" | "TT" => Ok(PaymentMethod::TelegraphicTransfer),
            "L/C" | "LC" => Ok(PaymentMethod::LetterOfCredit),
            "D/P" | "DP" => Ok(PaymentMethod::DocumentsAgainstPayment),
            "D/A" | "DA" => Ok(PaymentMethod::DocumentsAgainstAcceptance),
            "T/T+LC" => Ok(PaymentMethod::TransferPlusCredit),
            // 其他写法（如 "即期L/C"）只要包含 L/C 即视为信用证
            other if other.contains("L/C") => Ok(PaymentMethod::LetterOfCredit),
            _ => Err(format!("未知支付方式: {}", s.trim())),
        }
    }
}

// ==========================================
// 运输要求 (Transport Requirement)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportRequirement {
    Normal,  // 普通
    Chilled, // 冷藏
    Frozen,  // 冷冻
}

impl TransportRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportRequirement::Normal => "normal",
            TransportRequirement::Chilled => "chilled",
            TransportRequirement::Frozen => "frozen",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            TransportRequirement::Normal => "普通",
            TransportRequirement::Chilled => "冷藏",
            TransportRequirement::Frozen => "冷冻",
        }
    }

    /// 是否需要冷柜
    pub fn needs_refrigeration(&self) -> bool {
        !matches!(self, TransportRequirement::Normal)
    }
}

impl Default for TransportRequirement {
    fn default() -> Self {
        TransportRequirement::Normal
    }
}

impl fmt::Display for TransportRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title_cn())
    }
}

impl FromStr for TransportRequirement {
    type Err = String;

    /// 英文代码精确匹配；中文运输说明按关键字匹配（含"冷冻"为冷冻，其余含"冷"为冷藏）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "普通" | "无" | "" => Ok(TransportRequirement::Normal),
            "chilled" => Ok(TransportRequirement::Chilled),
            "frozen" => Ok(TransportRequirement::Frozen),
            note if note.contains("冷冻") => Ok(TransportRequirement::Frozen),
            note if note.contains('冷') => Ok(TransportRequirement::Chilled),
            other => Err(format!("未知运输要求: {}", other)),
        }
    }
}

// ==========================================
// 金额币种
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Currency {
    Local,   // 本币
    Foreign, // 结算币种
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Local => "¥",
            Currency::Foreign => "$",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_term_parse() {
        assert_eq!("fob".parse::<TradeTerm>().unwrap(), TradeTerm::Fob);
        assert_eq!(" DDP ".parse::<TradeTerm>().unwrap(), TradeTerm::Ddp);
        assert!("XYZ".parse::<TradeTerm>().is_err());
    }

    #[test]
    fn test_trade_term_flags() {
        assert!(!TradeTerm::Exw.requires_export_clearance());
        assert!(TradeTerm::Fob.requires_export_clearance());
        assert!(TradeTerm::Cif.seller_insures());
        assert!(!TradeTerm::Cfr.seller_insures());
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!(
            "T/T".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::TelegraphicTransfer
        );
        assert_eq!(
            "即期L/C".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::LetterOfCredit
        );
        assert!("CASH".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_transfer_plus_credit_is_not_letter_of_credit() {
        assert!(!PaymentMethod::TransferPlusCredit.is_letter_of_credit());
        assert!(PaymentMethod::LetterOfCredit.is_letter_of_credit());
        assert!(PaymentMethod::DocumentsAgainstAcceptance.is_collection());
    }

    #[test]
    fn test_transport_requirement_parse() {
        assert_eq!(
            "冷藏".parse::<TransportRequirement>().unwrap(),
            TransportRequirement::Chilled
        );
        assert_eq!(
            "Frozen".parse::<TransportRequirement>().unwrap(),
            TransportRequirement::Frozen
        );
        assert!(!TransportRequirement::Normal.needs_refrigeration());
    }

    #[test]
    fn test_transport_note_keywords() {
        let parse = |s: &str| s.parse::<TransportRequirement>().unwrap();
        assert_eq!(parse("需冷藏"), TransportRequirement::Chilled);
        assert_eq!(parse("冷藏运输 2-8℃"), TransportRequirement::Chilled);
        assert_eq!(parse("冷冻运输"), TransportRequirement::Frozen);
        assert_eq!(parse("-18℃冷冻"), TransportRequirement::Frozen);
        assert!("常温".parse::<TransportRequirement>().is_err());
        assert!("chilled goods".parse::<TransportRequirement>().is_err());
    }
}
