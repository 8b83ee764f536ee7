// ==========================================
// 出口预算表 - 集装箱目录与选择结果
// ==========================================

use serde::{Deserialize, Serialize};

/// 集装箱目录条目（每次核算静态，可由操作员配置）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerCatalogEntry {
    /// 箱型名称（如 20'GP）
    pub name: String,

    /// 容积（CBM）
    pub capacity_cbm: f64,

    /// 限重（KG）
    pub weight_limit_kg: f64,

    /// 单箱运费（USD）
    pub unit_price_usd: f64,

    /// 是否冷柜
    pub is_refrigerated: bool,
}

/// 单个箱型的装载测算结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerOption {
    pub entry: ContainerCatalogEntry,

    /// 按体积可装包装数
    pub qty_by_volume: f64,

    /// 按重量可装包装数
    pub qty_by_weight: f64,

    /// 每箱可装数 = min(按体积, 按重量)
    pub max_units_per_container: f64,

    pub containers_needed: i64,
    pub total_freight_usd: f64,
    pub per_unit_freight_usd: f64,
}

/// 最优箱型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSelection {
    pub chosen: ContainerCatalogEntry,
    pub containers_needed: i64,
    pub total_freight_usd: f64,
    pub per_unit_freight_usd: f64,
}

impl From<&ContainerOption> for ContainerSelection {
    fn from(option: &ContainerOption) -> Self {
        Self {
            chosen: option.entry.clone(),
            containers_needed: option.containers_needed,
            total_freight_usd: option.total_freight_usd,
            per_unit_freight_usd: option.per_unit_freight_usd,
        }
    }
}

/// 装运方式建议（仅提示，不影响选箱计算）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadAdvice {
    /// 超出拼箱限制，建议整箱 (FCL)
    FullContainerRecommended,
    /// 拼箱 (LCL) 或整箱均可
    ConsolidationFeasible,
}

impl LoadAdvice {
    pub fn message_cn(&self) -> &'static str {
        match self {
            LoadAdvice::FullContainerRecommended => "货物超过拼箱限制，建议使用整箱(FCL)",
            LoadAdvice::ConsolidationFeasible => "货物适合拼箱(LCL)或整箱(FCL)",
        }
    }
}
