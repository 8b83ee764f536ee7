// ==========================================
// 出口预算表 - 货物规格
// ==========================================
// ShipmentSpec: 单次核算的完整输入快照（不可变）
// ShipmentTotals: 由规格派生的总包装数 / 总体积 / 总重量
// ==========================================

use crate::domain::types::{PaymentMethod, TradeTerm, TransportRequirement};
use serde::{Deserialize, Serialize};

/// 货物规格（单次核算输入）
///
/// 所有自由文本字段已在边界处完成数值提取，这里只保存数值结果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentSpec {
    /// 交易数量（销售单位）
    pub quantity: i64,

    /// 采购单价（本币，含税）
    pub unit_purchase_price: f64,

    // ===== 每包装单位物理属性 =====
    pub unit_gross_weight_kg: f64,
    pub unit_net_weight_kg: f64,
    pub unit_volume_cbm: f64,

    /// 每包装单位可装销售单位数；<= 0 时按 quantity 计包装数
    pub units_per_package: f64,

    // ===== 税率（百分数） =====
    pub vat_rate_percent: f64,
    pub export_rebate_rate_percent: f64,

    /// 检验检疫类别（原样透传，含 "B" 时收取商检费用）
    pub inspection_category: String,

    pub trade_term: TradeTerm,
    pub payment_method: PaymentMethod,

    /// 汇率：1 单位结算币种折合本币
    pub exchange_rate: f64,

    /// 预期利润率（百分数）
    pub expected_profit_rate_percent: f64,

    pub transport_requirement: TransportRequirement,
}

impl ShipmentSpec {
    /// 检验检疫类别是否包含 "B"（区分大小写）
    pub fn requires_inspection(&self) -> bool {
        self.inspection_category.contains('B')
    }

    /// 计算总包装数及总体积/总重量
    pub fn totals(&self) -> ShipmentTotals {
        let quantity = self.quantity as f64;
        let package_count = if self.units_per_package > 0.0 {
            (quantity / self.units_per_package).ceil()
        } else {
            quantity
        };

        ShipmentTotals {
            package_count,
            total_volume_cbm: package_count * self.unit_volume_cbm,
            total_gross_weight_kg: package_count * self.unit_gross_weight_kg,
            total_net_weight_kg: package_count * self.unit_net_weight_kg,
        }
    }
}

/// 货物总量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipmentTotals {
    pub package_count: f64,
    pub total_volume_cbm: f64,
    pub total_gross_weight_kg: f64,
    pub total_net_weight_kg: f64,
}

/// 数值提取告警
///
/// 自由文本中未找到数值时按 0 参与计算，同时记录告警供界面提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionWarning {
    /// 字段名（如 "毛重"）
    pub field: String,
    /// 原始文本
    pub raw: String,
}

impl std::fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "字段「{}」未能提取数值（原文: {:?}），按 0 计算", self.field, self.raw)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// 样例：自动售货机 182 台，FOB，T/T
    pub fn vending_machine_spec() -> ShipmentSpec {
        ShipmentSpec {
            quantity: 182,
            unit_purchase_price: 4778.0,
            unit_gross_weight_kg: 280.0,
            unit_net_weight_kg: 220.0,
            unit_volume_cbm: 2.55,
            units_per_package: 1.0,
            vat_rate_percent: 13.0,
            export_rebate_rate_percent: 13.0,
            inspection_category: String::new(),
            trade_term: TradeTerm::Fob,
            payment_method: PaymentMethod::TelegraphicTransfer,
            exchange_rate: 1.368,
            expected_profit_rate_percent: 15.0,
            transport_requirement: TransportRequirement::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::vending_machine_spec;

    #[test]
    fn test_totals_one_unit_per_pallet() {
        let totals = vending_machine_spec().totals();
        assert_eq!(totals.package_count, 182.0);
        assert!((totals.total_volume_cbm - 464.1).abs() < 1e-9);
        assert!((totals.total_gross_weight_kg - 50_960.0).abs() < 1e-9);
        assert!((totals.total_net_weight_kg - 40_040.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_rounds_packages_up() {
        let mut spec = vending_machine_spec();
        spec.units_per_package = 4.0;
        assert_eq!(spec.totals().package_count, 46.0);
    }

    #[test]
    fn test_totals_fallback_when_units_per_package_not_positive() {
        for upp in [0.0, -3.0] {
            let mut spec = vending_machine_spec();
            spec.units_per_package = upp;
            assert_eq!(spec.totals().package_count, spec.quantity as f64);
        }
    }

    #[test]
    fn test_requires_inspection_is_case_sensitive() {
        let mut spec = vending_machine_spec();
        spec.inspection_category = "A/B".to_string();
        assert!(spec.requires_inspection());
        spec.inspection_category = "a/b".to_string();
        assert!(!spec.requires_inspection());
    }
}
