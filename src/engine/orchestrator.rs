// ==========================================
// 出口预算表 - 引擎编排器
// ==========================================
// 计算主流程:
// 1. 货物总量 + 装运方式提示
// 2. 集装箱优选（得出最优运费）
// 3. 成本核算（运费计入总成本）
// 4. 按试算报价反算利润率
// ==========================================

use crate::config::BudgetConfig;
use crate::domain::budget::{BudgetResult, ProfitProjection};
use crate::domain::container::{
    ContainerCatalogEntry, ContainerOption, ContainerSelection, LoadAdvice,
};
use crate::domain::shipment::{ExtractionWarning, ShipmentSpec, ShipmentTotals};
use crate::engine::advisory::LoadAdvisor;
use crate::engine::container::{no_feasible_reason, pick_best, ContainerSelector};
use crate::engine::cost::CostEngine;
use crate::engine::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

// ==========================================
// FreightOutcome - 运费结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FreightOutcome {
    Selected(ContainerSelection),
    /// 无可行箱型，运费尚未计算
    NoFeasibleOption { reason: String },
}

impl FreightOutcome {
    pub fn selection(&self) -> Option<&ContainerSelection> {
        match self {
            FreightOutcome::Selected(selection) => Some(selection),
            FreightOutcome::NoFeasibleOption { .. } => None,
        }
    }
}

// ==========================================
// BudgetReport - 出口预算报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub generated_at: DateTime<Utc>,

    pub spec: ShipmentSpec,
    pub totals: ShipmentTotals,
    pub load_advice: LoadAdvice,

    /// 全部可行箱型（目录顺序）
    pub container_options: Vec<ContainerOption>,
    pub freight: FreightOutcome,

    pub budget: BudgetResult,

    /// 试算报价 <= 0 时不做反算
    pub profit: Option<ProfitProjection>,

    /// 数值提取告警（由表单校验阶段填入）
    #[serde(default)]
    pub warnings: Vec<ExtractionWarning>,
}

// ==========================================
// BudgetOrchestrator - 引擎编排器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BudgetOrchestrator {
    cost: CostEngine,
    selector: ContainerSelector,
    advisor: LoadAdvisor,
}

impl BudgetOrchestrator {
    pub fn new(cost: CostEngine, selector: ContainerSelector, advisor: LoadAdvisor) -> Self {
        Self {
            cost,
            selector,
            advisor,
        }
    }

    pub fn from_config(config: &BudgetConfig) -> Self {
        Self::new(
            CostEngine::from_config(config),
            ContainerSelector::from_config(config),
            LoadAdvisor::from_config(config),
        )
    }

    /// 执行完整核算
    ///
    /// # 参数
    /// - spec: 货物规格
    /// - catalog: 集装箱目录
    /// - test_price: 试算报价（结算币种 / 单位）；None 时使用建议报价
    ///
    /// # 说明
    /// 无可行箱型不视为失败：运费标记为尚未计算，其余结果照常输出
    #[instrument(skip_all, fields(quantity = spec.quantity, catalog = catalog.len()))]
    pub fn run(
        &self,
        spec: &ShipmentSpec,
        catalog: &[ContainerCatalogEntry],
        test_price: Option<f64>,
    ) -> EngineResult<BudgetReport> {
        if let Some(price) = test_price {
            if !price.is_finite() || price < 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "试算报价必须为非负数，实际 {}",
                    price
                )));
            }
        }

        // 1. 货物总量 + 装运方式提示
        let totals = spec.totals();
        let load_advice = self.advisor.assess(&totals);

        // 2. 集装箱优选
        let container_options = self.selector.evaluate_options(spec, catalog)?;
        let freight = match pick_best(&container_options) {
            Some(best) => FreightOutcome::Selected(ContainerSelection::from(best)),
            None => {
                let reason = no_feasible_reason(spec, catalog);
                warn!("无可行箱型，运费尚未计算: {}", reason);
                FreightOutcome::NoFeasibleOption { reason }
            }
        };

        // 3. 成本核算
        let best_freight = freight.selection().map(|s| s.total_freight_usd);
        let budget = self.cost.compute_budget(spec, best_freight)?;

        // 4. 反算利润率
        let price = test_price.unwrap_or(budget.suggested_unit_price);
        let profit = if price > 0.0 {
            Some(self.cost.project_profit(spec, &budget, price)?)
        } else {
            None
        };

        info!(
            total_cost = budget.total_cost,
            suggested_unit_price = budget.suggested_unit_price,
            container = freight.selection().map(|s| s.chosen.name.as_str()).unwrap_or("-"),
            "出口预算核算完成"
        );

        Ok(BudgetReport {
            generated_at: Utc::now(),
            spec: spec.clone(),
            totals,
            load_advice,
            container_options,
            freight,
            budget,
            profit,
            warnings: Vec::new(),
        })
    }
}
