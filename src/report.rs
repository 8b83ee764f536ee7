// ==========================================
// 出口预算表 - 预算表文本渲染
// ==========================================
// 输出顺序: 货物总量 → 装运方式提示 → 箱型比较 → 成本明细 → 报价与利润
// ==========================================

use std::fmt::Write;

use crate::domain::budget::BudgetLineItem;
use crate::engine::{BudgetReport, FreightOutcome};

const RULE: &str = "------------------------------------------------------------";

/// 千分位金额，保留两位小数
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.00 不带负号
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// 渲染完整预算表
pub fn render_text(report: &BudgetReport) -> String {
    let mut out = String::new();
    // 写入 String 不会失败
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &BudgetReport) -> std::fmt::Result {
    let spec = &report.spec;
    let totals = &report.totals;
    let budget = &report.budget;

    writeln!(out, "出口预算表  ({})", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "贸易术语: {}  支付方式: {}  运输要求: {}  汇率: {}",
        spec.trade_term, spec.payment_method, spec.transport_requirement, spec.exchange_rate
    )?;
    writeln!(
        out,
        "交易数量: {}  总包装数: {}  总体积: {:.2} CBM  总毛重: {:.2} KGS  总净重: {:.2} KGS",
        spec.quantity,
        totals.package_count,
        totals.total_volume_cbm,
        totals.total_gross_weight_kg,
        totals.total_net_weight_kg
    )?;
    writeln!(out, "装运方式: {}", report.load_advice.message_cn())?;

    if !report.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "提示:")?;
        for warning in &report.warnings {
            writeln!(out, "  ! {}", warning)?;
        }
    }

    // 箱型比较
    writeln!(out)?;
    writeln!(out, "箱型比较")?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "{:<8}{:>10}{:>10}{:>10}{:>8}{:>14}{:>12}",
        "箱型", "按体积", "按重量", "每箱可装", "箱数", "总运费(USD)", "单位运费"
    )?;
    for option in &report.container_options {
        writeln!(
            out,
            "{:<8}{:>10.2}{:>10.2}{:>10.2}{:>8}{:>14}{:>12}",
            option.entry.name,
            option.qty_by_volume,
            option.qty_by_weight,
            option.max_units_per_container,
            option.containers_needed,
            format_amount(option.total_freight_usd),
            format_amount(option.per_unit_freight_usd)
        )?;
    }
    match &report.freight {
        FreightOutcome::Selected(selection) => writeln!(
            out,
            "最优箱型: {} × {}，总运费 ${}",
            selection.chosen.name,
            selection.containers_needed,
            format_amount(selection.total_freight_usd)
        )?,
        FreightOutcome::NoFeasibleOption { reason } => {
            writeln!(out, "无可行箱型: {}（运费尚未计算）", reason)?
        }
    }

    // 成本明细
    writeln!(out)?;
    writeln!(out, "成本明细")?;
    writeln!(out, "{}", RULE)?;
    for item in &budget.line_items {
        write_line_item(out, item)?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(out, "国内费用合计: ¥{}", format_amount(budget.domestic_total))?;
    writeln!(out, "总成本:       ¥{}", format_amount(budget.total_cost))?;
    writeln!(
        out,
        "建议报价:     ${} / 单位（预期利润率 {}%）",
        format_amount(budget.suggested_unit_price),
        spec.expected_profit_rate_percent
    )?;

    if let Some(profit) = &report.profit {
        writeln!(out)?;
        writeln!(out, "利润反算（报价 ${}）", format_amount(profit.test_price))?;
        writeln!(out, "{}", RULE)?;
        writeln!(out, "销售收入: ¥{}", format_amount(profit.revenue))?;
        writeln!(out, "利润:     ¥{}", format_amount(profit.profit))?;
        writeln!(
            out,
            "利润率:   {:.2}%  {}",
            profit.profit_margin * 100.0,
            if profit.meets_target {
                "达到预期"
            } else {
                "低于预期"
            }
        )?;
    }

    Ok(())
}

fn write_line_item(out: &mut String, item: &BudgetLineItem) -> std::fmt::Result {
    let amount = match item.amount {
        Some(value) => format!("{}{}", item.currency.symbol(), format_amount(value)),
        None => "-".to_string(),
    };
    writeln!(
        out,
        "{:<10}{:<14}{:>18}  {}",
        item.category.title_cn(),
        item.sub_item,
        amount,
        item.formula_description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::container::ContainerCatalogEntry;
    use crate::domain::shipment::fixtures::vending_machine_spec;
    use crate::engine::BudgetOrchestrator;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(869_396.0), "869,396.00");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(-1452.5), "-1,452.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_render_contains_sections() {
        let spec = vending_machine_spec();
        let catalog = vec![ContainerCatalogEntry {
            name: "20'GP".to_string(),
            capacity_cbm: 33.0,
            weight_limit_kg: 25000.0,
            unit_price_usd: 1452.0,
            is_refrigerated: false,
        }];
        let report = BudgetOrchestrator::default().run(&spec, &catalog, None).unwrap();
        let text = render_text(&report);

        assert!(text.contains("箱型比较"));
        assert!(text.contains("最优箱型: 20'GP × 15"));
        assert!(text.contains("869,596.00"));
        assert!(text.contains("利润反算"));
    }

    #[test]
    fn test_render_marks_missing_freight() {
        let spec = vending_machine_spec();
        let report = BudgetOrchestrator::default().run(&spec, &[], None).unwrap();
        let text = render_text(&report);
        assert!(text.contains("运费尚未计算"));
    }
}
