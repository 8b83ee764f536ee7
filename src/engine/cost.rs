// ==========================================
// 出口预算表 - 成本核算引擎
// ==========================================
// 公式来源: 出口预算表（采购成本 / 退税 / 国内费用 / 银行费用 / 运费）
// ==========================================
// 职责: 计算采购成本、退税、国内费用明细、银行费用、总成本、
//       建议报价，以及按试算报价反算利润率
// 输入: ShipmentSpec + 最优运费（结算币种）
// 输出: BudgetResult（含预算明细行）
// ==========================================

use crate::config::{BankFeeSchedule, BudgetConfig, FeeSchedule};
use crate::domain::budget::{
    BudgetCategory, BudgetLineItem, BudgetResult, DomesticFees, ProfitProjection,
};
use crate::domain::shipment::{ShipmentSpec, ShipmentTotals};
use crate::domain::types::Currency;
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, instrument};

// ==========================================
// CostEngine - 成本核算引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CostEngine {
    fees: FeeSchedule,
    bank_fees: BankFeeSchedule,
}

impl CostEngine {
    pub fn new(fees: FeeSchedule, bank_fees: BankFeeSchedule) -> Self {
        Self { fees, bank_fees }
    }

    pub fn from_config(config: &BudgetConfig) -> Self {
        Self::new(config.fees.clone(), config.bank_fees.clone())
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算出口预算
    ///
    /// # 参数
    /// - spec: 货物规格
    /// - best_freight_foreign: 最优运费（结算币种）；None 表示运费尚未计算，按 0 计入总成本
    ///
    /// # 返回
    /// - Ok(BudgetResult)
    /// - Err(InvalidInput): 数量 <= 0 或汇率 <= 0
    #[instrument(skip(self, spec), fields(quantity = spec.quantity, trade_term = %spec.trade_term))]
    pub fn compute_budget(
        &self,
        spec: &ShipmentSpec,
        best_freight_foreign: Option<f64>,
    ) -> EngineResult<BudgetResult> {
        check_preconditions(spec)?;

        let rate = spec.exchange_rate;
        let totals = spec.totals();

        // 1. 采购成本
        let purchase_total = self.purchase_total(spec);

        // 2. 退税收入
        let rebate = self.rebate(spec, purchase_total);

        // 3. 国内费用
        let domestic = self.domestic_fees(spec, &totals, purchase_total);
        let domestic_total = domestic.total();

        // 4. 银行费用（结算币种）
        let bank_fee_foreign = self.bank_fee(spec, purchase_total);

        // 5. 国际运费（结算币种）
        let freight_foreign = best_freight_foreign.unwrap_or(0.0);

        let total_cost = purchase_total - rebate
            + domestic_total
            + bank_fee_foreign * rate
            + freight_foreign * rate;

        let suggested_unit_price = total_cost
            * (1.0 + spec.expected_profit_rate_percent / 100.0)
            / spec.quantity as f64
            / rate;

        debug!(
            purchase_total,
            rebate, domestic_total, bank_fee_foreign, freight_foreign, total_cost, "预算核算完成"
        );

        let line_items = self.line_items(
            spec,
            &totals,
            purchase_total,
            rebate,
            &domestic,
            bank_fee_foreign,
            best_freight_foreign,
        );

        Ok(BudgetResult {
            totals,
            purchase_total,
            rebate,
            domestic,
            domestic_total,
            bank_fee_foreign,
            freight_foreign,
            total_cost,
            suggested_unit_price,
            line_items,
        })
    }

    /// 按试算报价反算盈亏
    ///
    /// # 参数
    /// - test_price: 试算报价（结算币种 / 单位）
    ///
    /// # 说明
    /// 采购成本为 0 时利润率定义为 0
    pub fn project_profit(
        &self,
        spec: &ShipmentSpec,
        budget: &BudgetResult,
        test_price: f64,
    ) -> EngineResult<ProfitProjection> {
        check_preconditions(spec)?;
        if !test_price.is_finite() || test_price < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "试算报价必须为非负数，实际 {}",
                test_price
            )));
        }

        let revenue = test_price * spec.quantity as f64 * spec.exchange_rate;
        let profit = revenue - budget.total_cost;
        let profit_margin = if budget.purchase_total > 0.0 {
            profit / budget.purchase_total
        } else {
            0.0
        };

        Ok(ProfitProjection {
            test_price,
            revenue,
            profit,
            profit_margin,
            meets_target: profit_margin >= spec.expected_profit_rate_percent / 100.0,
        })
    }

    // ==========================================
    // 分项计算
    // ==========================================

    /// 采购成本 = 采购单价 × 交易数量
    pub fn purchase_total(&self, spec: &ShipmentSpec) -> f64 {
        spec.unit_purchase_price * spec.quantity as f64
    }

    /// 退税额 = 含税价 ÷ (1 + 增值税率) × 退税率
    pub fn rebate(&self, spec: &ShipmentSpec, purchase_total: f64) -> f64 {
        purchase_total / (1.0 + spec.vat_rate_percent / 100.0)
            * (spec.export_rebate_rate_percent / 100.0)
    }

    /// 国内费用明细（本币）
    pub fn domestic_fees(
        &self,
        spec: &ShipmentSpec,
        totals: &ShipmentTotals,
        purchase_total: f64,
    ) -> DomesticFees {
        let rate = spec.exchange_rate;
        let fees = &self.fees;
        let inspected = spec.requires_inspection();

        DomesticFees {
            inland_fee: self.inland_base(totals) * rate,
            forwarder_fee: self.forwarder_base(totals) * rate,
            inspection_fee: if inspected { fees.inspection_fee * rate } else { 0.0 },
            certificate_fee: if inspected { fees.certificate_fee * rate } else { 0.0 },
            customs_fee: if spec.trade_term.requires_export_clearance() {
                fees.customs_fee * rate
            } else {
                0.0
            },
            insurance: if spec.trade_term.seller_insures() {
                purchase_total * fees.insurance_markup * fees.insurance_rate
            } else {
                0.0
            },
        }
    }

    /// 银行费用（结算币种）
    ///
    /// - 托收 (D/P, D/A): clamp(采购成本 × 0.1%, 15, 285) + 45
    /// - 信用证: max(采购成本 × 0.125%, 15) + 75
    /// - 其他: 0
    pub fn bank_fee(&self, spec: &ShipmentSpec, purchase_total: f64) -> f64 {
        let bank = &self.bank_fees;
        let payment = spec.payment_method;

        if payment.is_collection() {
            (purchase_total * bank.collection_rate)
                .min(bank.collection_max)
                .max(bank.collection_min)
                + bank.collection_surcharge
        } else if payment.is_letter_of_credit() {
            (purchase_total * bank.credit_rate).max(bank.credit_min) + bank.credit_surcharge
        } else {
            0.0
        }
    }

    /// 内陆运费基数（结算币种）= MAX(50, 总体积 × 10)
    fn inland_base(&self, totals: &ShipmentTotals) -> f64 {
        self.fees
            .inland_min
            .max(totals.total_volume_cbm * self.fees.inland_per_cbm)
    }

    /// 货代杂费基数（结算币种）= MAX(70, 总体积 × 2.5)
    fn forwarder_base(&self, totals: &ShipmentTotals) -> f64 {
        self.fees
            .forwarder_min
            .max(totals.total_volume_cbm * self.fees.forwarder_per_cbm)
    }

    // ==========================================
    // 预算明细行
    // ==========================================
    #[allow(clippy::too_many_arguments)]
    fn line_items(
        &self,
        spec: &ShipmentSpec,
        totals: &ShipmentTotals,
        purchase_total: f64,
        rebate: f64,
        domestic: &DomesticFees,
        bank_fee_foreign: f64,
        freight_foreign: Option<f64>,
    ) -> Vec<BudgetLineItem> {
        let rate = spec.exchange_rate;
        let fees = &self.fees;
        let volume = totals.total_volume_cbm;
        let inspection_note = if spec.requires_inspection() {
            "检验检疫类别含B，收取"
        } else {
            "检验检疫类别不含B，不收取"
        };

        let local = |category, sub_item: &str, amount: f64, formula: String| BudgetLineItem {
            category,
            sub_item: sub_item.to_string(),
            amount: Some(amount),
            currency: Currency::Local,
            formula_description: formula,
        };

        let mut items = vec![
            local(
                BudgetCategory::PurchaseCost,
                "含税购入价",
                purchase_total,
                format!(
                    "采购单价 × 交易数量 = {} × {}",
                    spec.unit_purchase_price, spec.quantity
                ),
            ),
            local(
                BudgetCategory::RebateIncome,
                "退税额",
                rebate,
                format!(
                    "含税价 ÷ (1+增值税率) × 退税率 = {:.2} ÷ {:.2} × {:.2}",
                    purchase_total,
                    1.0 + spec.vat_rate_percent / 100.0,
                    spec.export_rebate_rate_percent / 100.0
                ),
            ),
            local(
                BudgetCategory::DomesticFees,
                "出口内陆运费",
                domestic.inland_fee,
                format!(
                    "MAX({}, {:.2}×{}) = {:.2}，乘以汇率{}",
                    fees.inland_min,
                    volume,
                    fees.inland_per_cbm,
                    self.inland_base(totals),
                    rate
                ),
            ),
            local(
                BudgetCategory::DomesticFees,
                "出口货代杂费",
                domestic.forwarder_fee,
                format!(
                    "MAX({}, {:.2}×{}) = {:.2}，乘以汇率{}",
                    fees.forwarder_min,
                    volume,
                    fees.forwarder_per_cbm,
                    self.forwarder_base(totals),
                    rate
                ),
            ),
            local(
                BudgetCategory::DomesticFees,
                "出口商检费",
                domestic.inspection_fee,
                format!("{}: {} × {}", inspection_note, fees.inspection_fee, rate),
            ),
            local(
                BudgetCategory::DomesticFees,
                "检验检疫证书费",
                domestic.certificate_fee,
                format!("{}: {} × {}", inspection_note, fees.certificate_fee, rate),
            ),
            local(
                BudgetCategory::DomesticFees,
                "出口报关费",
                domestic.customs_fee,
                format!(
                    "贸易术语为{}，{}报关费",
                    spec.trade_term,
                    if spec.trade_term.requires_export_clearance() {
                        "收取"
                    } else {
                        "不收取"
                    }
                ),
            ),
            local(
                BudgetCategory::DomesticFees,
                "保险费",
                domestic.insurance,
                if spec.trade_term.seller_insures() {
                    format!(
                        "采购成本 × {} × {} = {:.2} × {} × {}",
                        fees.insurance_markup,
                        fees.insurance_rate,
                        purchase_total,
                        fees.insurance_markup,
                        fees.insurance_rate
                    )
                } else {
                    format!("贸易术语为{}，出口方不投保", spec.trade_term)
                },
            ),
        ];

        items.push(BudgetLineItem {
            category: BudgetCategory::BankFees,
            sub_item: "银行费用".to_string(),
            amount: Some(bank_fee_foreign),
            currency: Currency::Foreign,
            formula_description: format!(
                "支付方式{}，手续费 = {:.2}",
                spec.payment_method, bank_fee_foreign
            ),
        });

        items.push(BudgetLineItem {
            category: BudgetCategory::Freight,
            sub_item: "集装箱运费".to_string(),
            amount: freight_foreign,
            currency: Currency::Foreign,
            formula_description: match freight_foreign {
                Some(_) => "最优箱型: 箱数 × 单箱运费".to_string(),
                None => "运费尚未计算".to_string(),
            },
        });

        items
    }
}

/// 引擎前置条件：数量 > 0，汇率 > 0
fn check_preconditions(spec: &ShipmentSpec) -> EngineResult<()> {
    if spec.quantity <= 0 {
        return Err(EngineError::InvalidInput(format!(
            "交易数量必须大于 0，实际 {}",
            spec.quantity
        )));
    }
    if !spec.exchange_rate.is_finite() || spec.exchange_rate <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "汇率必须大于 0，实际 {}",
            spec.exchange_rate
        )));
    }
    Ok(())
}
