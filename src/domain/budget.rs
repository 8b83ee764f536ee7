// ==========================================
// 出口预算表 - 预算结果
// ==========================================
// BudgetLineItem 仅用于展示，每次核算整体重新生成
// ==========================================

use crate::domain::shipment::ShipmentTotals;
use crate::domain::types::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 预算项目分类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetCategory {
    PurchaseCost,  // 1.采购成本
    RebateIncome,  // 2.退税收入
    DomesticFees,  // 3.国内费用
    BankFees,      // 4.银行费用
    Freight,       // 5.国际运费
}

impl BudgetCategory {
    pub fn title_cn(&self) -> &'static str {
        match self {
            BudgetCategory::PurchaseCost => "1.采购成本",
            BudgetCategory::RebateIncome => "2.退税收入",
            BudgetCategory::DomesticFees => "3.国内费用",
            BudgetCategory::BankFees => "4.银行费用",
            BudgetCategory::Freight => "5.国际运费",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title_cn())
    }
}

/// 预算明细行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLineItem {
    pub category: BudgetCategory,

    /// 费用项目
    pub sub_item: String,

    /// 金额；None 表示尚未计算（如运费无可行箱型）
    pub amount: Option<f64>,

    pub currency: Currency,

    /// 计算原理说明
    pub formula_description: String,
}

/// 国内费用明细（本币）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomesticFees {
    pub inland_fee: f64,
    pub forwarder_fee: f64,
    pub inspection_fee: f64,
    pub certificate_fee: f64,
    pub customs_fee: f64,
    pub insurance: f64,
}

impl DomesticFees {
    pub fn total(&self) -> f64 {
        self.inland_fee
            + self.forwarder_fee
            + self.inspection_fee
            + self.certificate_fee
            + self.customs_fee
            + self.insurance
    }
}

/// 预算核算结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResult {
    pub totals: ShipmentTotals,

    /// 采购成本（本币）
    pub purchase_total: f64,

    /// 退税额（本币）
    pub rebate: f64,

    pub domestic: DomesticFees,

    /// 国内费用合计（本币）
    pub domestic_total: f64,

    /// 银行费用（结算币种）
    pub bank_fee_foreign: f64,

    /// 国际运费（结算币种）
    pub freight_foreign: f64,

    /// 总成本（本币）
    pub total_cost: f64,

    /// 建议报价（结算币种 / 单位）
    pub suggested_unit_price: f64,

    pub line_items: Vec<BudgetLineItem>,
}

/// 按试算报价反算的盈亏
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitProjection {
    /// 试算报价（结算币种 / 单位）
    pub test_price: f64,

    /// 总收入（本币）
    pub revenue: f64,

    /// 利润（本币，可为负）
    pub profit: f64,

    /// 利润率 = 利润 / 采购成本
    pub profit_margin: f64,

    /// 利润率是否达到预期利润率
    pub meets_target: bool,
}
