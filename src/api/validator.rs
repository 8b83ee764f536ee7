// ==========================================
// 出口预算表 - 录入表单校验器
// ==========================================
// 职责: 录入表单（自由文本 + 数值 + 枚举文本）→ 货物规格
// 规则:
// - 结构性错误（数量/汇率/税率/枚举）直接拒绝
// - 自由文本中提取不到数值时按 0 计算，并返回告警
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::error::{ApiError, ApiResult};
use crate::config::TradeDefaults;
use crate::domain::reference::ReferenceBundle;
use crate::domain::shipment::{ExtractionWarning, ShipmentSpec};
use crate::domain::types::{PaymentMethod, TradeTerm, TransportRequirement};
use crate::engine::number_extract::try_extract_number;

// ==========================================
// ShipmentForm - 录入表单
// ==========================================

/// 录入表单（原始值）
///
/// 物理属性保持基础资料中的原文（如 "280.00KGS/托盘"），校验时再提取数值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentForm {
    pub product_code: String,

    // ===== 交易信息 =====
    pub quantity: i64,
    pub unit_purchase_price: f64,
    pub trade_term: String,
    pub payment_method: String,
    pub exchange_rate: f64,
    pub expected_profit_rate_percent: f64,

    // ===== 商品信息（自由文本） =====
    pub unit_conversion: String,
    pub gross_weight: String,
    pub net_weight: String,
    pub volume: String,
    pub transport_requirement: String,

    // ===== HS 信息 =====
    pub vat_rate_percent: f64,
    pub export_rebate_rate_percent: f64,
    pub inspection_category: String,
}

impl ShipmentForm {
    /// 由基础资料 + 交易默认值生成表单
    ///
    /// 采购单价与数量属于交易信息，取交易默认值；汇率取汇率表
    pub fn from_bundle(bundle: &ReferenceBundle, defaults: &TradeDefaults) -> Self {
        Self {
            product_code: bundle.product.product_code.clone(),
            quantity: defaults.quantity,
            unit_purchase_price: defaults.unit_purchase_price,
            trade_term: defaults.trade_term.clone(),
            payment_method: defaults.payment_method.clone(),
            exchange_rate: bundle.exchange_rate.rate,
            expected_profit_rate_percent: defaults.expected_profit_rate_percent,
            unit_conversion: bundle.product.unit_conversion.clone(),
            gross_weight: bundle.product.gross_weight.clone(),
            net_weight: bundle.product.net_weight.clone(),
            volume: bundle.product.volume.clone(),
            transport_requirement: bundle.product.transport_note.clone().unwrap_or_default(),
            vat_rate_percent: bundle.hs.vat_rate_percent,
            export_rebate_rate_percent: bundle.hs.export_rebate_rate_percent,
            inspection_category: bundle.hs.inspection_category.clone().unwrap_or_default(),
        }
    }
}

// ==========================================
// ShipmentValidator - 表单校验器
// ==========================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ShipmentValidator;

impl ShipmentValidator {
    /// 校验表单并生成货物规格
    ///
    /// # 返回
    /// - Ok((ShipmentSpec, warnings)): 校验通过；warnings 为数值提取告警
    /// - Err(ApiError::InvalidInput): 结构性错误
    pub fn validate(&self, form: &ShipmentForm) -> ApiResult<(ShipmentSpec, Vec<ExtractionWarning>)> {
        // 交易信息
        if form.quantity <= 0 {
            return Err(invalid(format!("交易数量必须大于 0，实际 {}", form.quantity)));
        }
        if !form.exchange_rate.is_finite() || form.exchange_rate <= 0.0 {
            return Err(invalid(format!("汇率必须大于 0，实际 {}", form.exchange_rate)));
        }
        non_negative("采购单价", form.unit_purchase_price)?;
        non_negative("预期利润率", form.expected_profit_rate_percent)?;
        percentage("增值税率", form.vat_rate_percent)?;
        percentage("出口退税率", form.export_rebate_rate_percent)?;

        let trade_term: TradeTerm = form.trade_term.parse().map_err(invalid)?;
        let payment_method: PaymentMethod = form.payment_method.parse().map_err(invalid)?;
        let transport_requirement: TransportRequirement =
            form.transport_requirement.parse().map_err(invalid)?;

        // 自由文本数值提取
        let mut warnings = Vec::new();
        let unit_gross_weight_kg = extract("毛重", &form.gross_weight, &mut warnings);
        let unit_net_weight_kg = extract("净重", &form.net_weight, &mut warnings);
        let unit_volume_cbm = extract("体积", &form.volume, &mut warnings);
        let units_per_package = extract("单位换算", &form.unit_conversion, &mut warnings);

        non_negative("毛重", unit_gross_weight_kg)?;
        non_negative("净重", unit_net_weight_kg)?;
        non_negative("体积", unit_volume_cbm)?;

        for warning in &warnings {
            warn!(product_code = %form.product_code, "{}", warning);
        }

        let spec = ShipmentSpec {
            quantity: form.quantity,
            unit_purchase_price: form.unit_purchase_price,
            unit_gross_weight_kg,
            unit_net_weight_kg,
            unit_volume_cbm,
            units_per_package,
            vat_rate_percent: form.vat_rate_percent,
            export_rebate_rate_percent: form.export_rebate_rate_percent,
            inspection_category: form.inspection_category.trim().to_string(),
            trade_term,
            payment_method,
            exchange_rate: form.exchange_rate,
            expected_profit_rate_percent: form.expected_profit_rate_percent,
            transport_requirement,
        };

        Ok((spec, warnings))
    }

    /// 校验试算报价：给出时必须为有限的非负数
    pub fn validate_test_price(&self, test_price: Option<f64>) -> ApiResult<()> {
        match test_price {
            Some(price) => non_negative("试算报价", price),
            None => Ok(()),
        }
    }
}

fn invalid(message: String) -> ApiError {
    ApiError::InvalidInput(message)
}

fn non_negative(field: &str, value: f64) -> ApiResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{}不能为负数或非数值，实际 {}", field, value)))
    }
}

fn percentage(field: &str, value: f64) -> ApiResult<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{}必须在 0~100 之间，实际 {}", field, value)))
    }
}

/// 提取失败按 0 计算并记录告警
fn extract(field: &str, raw: &str, warnings: &mut Vec<ExtractionWarning>) -> f64 {
    try_extract_number(raw).unwrap_or_else(|| {
        warnings.push(ExtractionWarning {
            field: field.to_string(),
            raw: raw.to_string(),
        });
        0.0
    })
}
