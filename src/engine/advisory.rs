// ==========================================
// 出口预算表 - 装运方式提示
// ==========================================
// 总毛重或总体积超过拼箱限制时提示使用整箱
// 仅为提示信息，不参与选箱计算
// ==========================================

use crate::config::{BudgetConfig, LoadThresholds};
use crate::domain::container::LoadAdvice;
use crate::domain::shipment::ShipmentTotals;

#[derive(Debug, Clone, Default)]
pub struct LoadAdvisor {
    thresholds: LoadThresholds,
}

impl LoadAdvisor {
    pub fn new(thresholds: LoadThresholds) -> Self {
        Self { thresholds }
    }

    pub fn from_config(config: &BudgetConfig) -> Self {
        Self::new(config.load_thresholds.clone())
    }

    pub fn assess(&self, totals: &ShipmentTotals) -> LoadAdvice {
        if totals.total_gross_weight_kg > self.thresholds.max_consolidated_weight_kg
            || totals.total_volume_cbm > self.thresholds.max_consolidated_volume_cbm
        {
            LoadAdvice::FullContainerRecommended
        } else {
            LoadAdvice::ConsolidationFeasible
        }
    }
}
