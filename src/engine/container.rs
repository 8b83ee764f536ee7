// ==========================================
// 出口预算表 - 集装箱优选引擎
// ==========================================
// 规则: 对目录中每个可用箱型计算所需箱数与单位运费，取单位运费最低者
// 冷柜仅在冷藏/冷冻货物时可选；普柜始终可选
// 并列时取目录顺序中先出现者
// ==========================================

use crate::config::{BudgetConfig, SelectionPolicy};
use crate::domain::container::{ContainerCatalogEntry, ContainerOption, ContainerSelection};
use crate::domain::shipment::ShipmentSpec;
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, instrument};

// ==========================================
// ContainerSelector - 集装箱优选引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ContainerSelector {
    policy: SelectionPolicy,
}

impl ContainerSelector {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &BudgetConfig) -> Self {
        Self::new(config.selection.clone())
    }

    /// 箱型是否适用于该运输要求
    pub fn is_eligible(&self, spec: &ShipmentSpec, entry: &ContainerCatalogEntry) -> bool {
        !entry.is_refrigerated || spec.transport_requirement.needs_refrigeration()
    }

    /// 计算全部可行箱型的装载方案（保持目录顺序）
    ///
    /// 单位体积或单位毛重为 0 时对应可装数视为 0，该箱型被跳过
    #[instrument(skip(self, spec, catalog), fields(quantity = spec.quantity, catalog = catalog.len()))]
    pub fn evaluate_options(
        &self,
        spec: &ShipmentSpec,
        catalog: &[ContainerCatalogEntry],
    ) -> EngineResult<Vec<ContainerOption>> {
        if spec.quantity <= 0 {
            return Err(EngineError::InvalidInput(format!(
                "交易数量必须大于 0，实际 {}",
                spec.quantity
            )));
        }

        let quantity = spec.quantity as f64;
        let mut options = Vec::with_capacity(catalog.len());

        for entry in catalog.iter().filter(|e| self.is_eligible(spec, e)) {
            let qty_by_volume = ratio(entry.capacity_cbm, spec.unit_volume_cbm);
            let qty_by_weight = ratio(entry.weight_limit_kg, spec.unit_gross_weight_kg);

            let mut max_units = qty_by_volume.min(qty_by_weight);
            if self.policy.floor_units_per_container {
                max_units = max_units.floor();
            }

            if max_units <= 0.0 || !max_units.is_finite() {
                debug!(container = %entry.name, "可装数为 0，跳过");
                continue;
            }

            let containers_needed = (quantity / max_units).ceil();
            let total_freight_usd = containers_needed * entry.unit_price_usd;

            options.push(ContainerOption {
                entry: entry.clone(),
                qty_by_volume,
                qty_by_weight,
                max_units_per_container: max_units,
                containers_needed: containers_needed as i64,
                total_freight_usd,
                per_unit_freight_usd: total_freight_usd / quantity,
            });
        }

        Ok(options)
    }

    /// 选出单位运费最低的箱型
    ///
    /// # 返回
    /// - Ok(ContainerSelection)
    /// - Err(NoFeasibleOption): 没有箱型可装载
    pub fn select_best(
        &self,
        spec: &ShipmentSpec,
        catalog: &[ContainerCatalogEntry],
    ) -> EngineResult<ContainerSelection> {
        let options = self.evaluate_options(spec, catalog)?;
        pick_best(&options)
            .map(ContainerSelection::from)
            .ok_or_else(|| EngineError::NoFeasibleOption {
                reason: no_feasible_reason(spec, catalog),
            })
    }
}

/// 线性扫描取最小单位运费；严格小于才替换，保证并列时先出现者胜出
pub fn pick_best(options: &[ContainerOption]) -> Option<&ContainerOption> {
    let mut best: Option<&ContainerOption> = None;
    for option in options {
        match best {
            Some(current) if option.per_unit_freight_usd >= current.per_unit_freight_usd => {}
            _ => best = Some(option),
        }
    }
    best
}

/// 容量比值；分母 <= 0 时视为 0
fn ratio(capacity: f64, per_unit: f64) -> f64 {
    if per_unit > 0.0 {
        capacity / per_unit
    } else {
        0.0
    }
}

/// 无可行箱型的原因说明
pub(crate) fn no_feasible_reason(spec: &ShipmentSpec, catalog: &[ContainerCatalogEntry]) -> String {
    if catalog.is_empty() {
        "集装箱目录为空".to_string()
    } else if spec.unit_volume_cbm <= 0.0 || spec.unit_gross_weight_kg <= 0.0 {
        format!(
            "单位体积({})或单位毛重({})不大于 0",
            spec.unit_volume_cbm, spec.unit_gross_weight_kg
        )
    } else {
        format!("目录中没有适用于{}货物的箱型", spec.transport_requirement)
    }
}
