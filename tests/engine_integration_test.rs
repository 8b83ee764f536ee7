// ==========================================
// 引擎间集成测试
// ==========================================
// 职责: 验证集装箱优选 → 成本核算 → 利润反算的数据流转
// 场景: 上海-马尼拉航线自动售货机样例
// ==========================================

mod helpers;

use export_budget::config::{BudgetConfig, SelectionPolicy};
use export_budget::domain::types::{PaymentMethod, TradeTerm, TransportRequirement};
use export_budget::domain::LoadAdvice;
use export_budget::engine::{
    BudgetOrchestrator, ContainerSelector, CostEngine, EngineError, FreightOutcome, LoadAdvisor,
};
use helpers::test_data_builder::{container, manila_catalog, ShipmentBuilder};

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

// ==========================================
// 样例场景
// ==========================================

#[test]
fn test_sample_shipment_selects_40gp() {
    export_budget::logging::init_test();
    let spec = ShipmentBuilder::new().build();
    let report = BudgetOrchestrator::default()
        .run(&spec, &manila_catalog(), None)
        .unwrap();

    // 普柜三种: 20'GP 15 箱 / 40'GP 7 箱 / 40'HC 7 箱
    assert_eq!(report.container_options.len(), 3);
    let selection = report.freight.selection().unwrap();
    assert_eq!(selection.chosen.name, "40'GP");
    assert_eq!(selection.containers_needed, 7);
    assert!(approx(selection.total_freight_usd, 18_291.0, 1e-9));
    assert!(approx(selection.per_unit_freight_usd, 100.5, 1e-9));

    // 运费按汇率折本币计入总成本
    let budget = &report.budget;
    let expected_total = budget.purchase_total - budget.rebate
        + budget.domestic_total
        + budget.bank_fee_foreign * 1.368
        + 18_291.0 * 1.368;
    assert!(approx(budget.total_cost, expected_total, 1e-6));
    assert_eq!(report.load_advice, LoadAdvice::FullContainerRecommended);
}

#[test]
fn test_purchase_and_rebate_scenario() {
    let spec = ShipmentBuilder::new().build();
    let budget = CostEngine::default().compute_budget(&spec, None).unwrap();

    assert!(approx(budget.purchase_total, 869_596.0, 1e-6));
    assert!(approx(budget.rebate, 869_596.0 / 1.13 * 0.13, 1e-6));
}

#[test]
fn test_unrounded_versus_floored_container_count() {
    let spec = ShipmentBuilder::new().build();
    let catalog = vec![container("20'GP", 33.0, 25000.0, 1452.0, false)];

    let unrounded = ContainerSelector::default()
        .select_best(&spec, &catalog)
        .unwrap();
    assert_eq!(unrounded.containers_needed, 15);

    let floored = ContainerSelector::new(SelectionPolicy {
        floor_units_per_container: true,
    })
    .select_best(&spec, &catalog)
    .unwrap();
    assert_eq!(floored.containers_needed, 16);
}

// ==========================================
// 冷链货物
// ==========================================

#[test]
fn test_frozen_cargo_considers_reefers() {
    let spec = ShipmentBuilder::new()
        .transport(TransportRequirement::Frozen)
        .build();
    let options = ContainerSelector::default()
        .evaluate_options(&spec, &manila_catalog())
        .unwrap();

    assert_eq!(options.len(), 6);
    assert!(options.iter().any(|o| o.entry.is_refrigerated));
}

#[test]
fn test_reefer_only_catalog_infeasible_for_normal_cargo() {
    let spec = ShipmentBuilder::new().build();
    let catalog: Vec<_> = manila_catalog()
        .into_iter()
        .filter(|c| c.is_refrigerated)
        .collect();

    let result = ContainerSelector::default().select_best(&spec, &catalog);
    assert!(matches!(result, Err(EngineError::NoFeasibleOption { .. })));

    // 编排器不视为失败，运费标记为尚未计算
    let report = BudgetOrchestrator::default().run(&spec, &catalog, None).unwrap();
    assert!(matches!(report.freight, FreightOutcome::NoFeasibleOption { .. }));
    assert_eq!(report.budget.freight_foreign, 0.0);
}

// ==========================================
// 性质测试
// ==========================================

#[test]
fn test_package_fallback_when_conversion_missing() {
    for upp in [0.0, -2.0] {
        let spec = ShipmentBuilder::new().units_per_package(upp).build();
        let totals = spec.totals();
        assert_eq!(totals.package_count, 182.0);
        assert!(approx(totals.total_volume_cbm, 182.0 * 2.55, 1e-9));
    }
}

#[test]
fn test_budget_invariants_over_inputs() {
    let engine = CostEngine::default();
    for term in TradeTerm::ALL {
        for method in [
            PaymentMethod::TelegraphicTransfer,
            PaymentMethod::LetterOfCredit,
            PaymentMethod::DocumentsAgainstPayment,
            PaymentMethod::DocumentsAgainstAcceptance,
            PaymentMethod::TransferPlusCredit,
        ] {
            for (vat, rebate) in [(0.0, 0.0), (13.0, 13.0), (13.0, 9.0), (100.0, 100.0)] {
                let spec = ShipmentBuilder::new()
                    .trade_term(term)
                    .payment(method)
                    .rates(vat, rebate)
                    .inspection("B")
                    .build();
                let budget = engine.compute_budget(&spec, Some(1452.0)).unwrap();

                assert!(budget.domestic_total >= 0.0);
                assert!(budget.rebate >= 0.0);
                assert!(budget.rebate <= budget.purchase_total + 1e-9);
                assert!(budget.bank_fee_foreign >= 0.0);
            }
        }
    }
}

#[test]
fn test_containers_needed_monotonic() {
    let selector = ContainerSelector::default();
    let catalog = manila_catalog();

    let mut previous = vec![0_i64; 3];
    for quantity in (1..=1000).step_by(7) {
        let spec = ShipmentBuilder::new().quantity(quantity).build();
        let options = selector.evaluate_options(&spec, &catalog).unwrap();
        for (idx, option) in options.iter().enumerate() {
            assert!(option.containers_needed >= previous[idx]);
            previous[idx] = option.containers_needed;
        }
    }
}

#[test]
fn test_orchestrator_is_idempotent() {
    let spec = ShipmentBuilder::new().payment(PaymentMethod::LetterOfCredit).build();
    let orchestrator = BudgetOrchestrator::default();

    let first = orchestrator.run(&spec, &manila_catalog(), Some(600.0)).unwrap();
    let second = orchestrator.run(&spec, &manila_catalog(), Some(600.0)).unwrap();

    assert_eq!(first.budget, second.budget);
    assert_eq!(first.freight, second.freight);
    assert_eq!(first.profit, second.profit);
}

// ==========================================
// 装运方式提示
// ==========================================

#[test]
fn test_small_shipment_can_consolidate() {
    let spec = ShipmentBuilder::new().quantity(10).build();
    // 10 托盘: 25.5 CBM / 2800 KGS
    let advice = LoadAdvisor::default().assess(&spec.totals());
    assert_eq!(advice, LoadAdvice::ConsolidationFeasible);
}

#[test]
fn test_configured_engines_follow_config() {
    let mut config = BudgetConfig::default();
    config.fees.customs_fee = 50.0;
    config.selection.floor_units_per_container = true;

    let spec = ShipmentBuilder::new().build();
    let catalog = vec![container("20'GP", 33.0, 25000.0, 1452.0, false)];
    let report = BudgetOrchestrator::from_config(&config)
        .run(&spec, &catalog, None)
        .unwrap();

    assert!(approx(report.budget.domestic.customs_fee, 50.0 * 1.368, 1e-9));
    assert_eq!(report.freight.selection().unwrap().containers_needed, 16);
}
