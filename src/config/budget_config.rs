// ==========================================
// 出口预算表 - 预算参数配置
// ==========================================
// 费率常量、银行费用规则、拼箱限制、箱型规格、交易默认值
// 所有结构体均 #[serde(default)]，配置文件可只写需要覆盖的字段
// ==========================================

use crate::domain::reference::ContainerSpec;
use serde::{Deserialize, Serialize};

/// 预算参数全集
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BudgetConfig {
    pub fees: FeeSchedule,
    pub bank_fees: BankFeeSchedule,
    pub load_thresholds: LoadThresholds,
    pub selection: SelectionPolicy,
    pub container_specs: ContainerSpecs,
    pub trade_defaults: TradeDefaults,
}

// ==========================================
// 国内费用费率
// ==========================================
// 金额单位为结算币种，计入预算时乘以汇率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// 内陆运费 = MAX(inland_min, 总体积 × inland_per_cbm)
    pub inland_min: f64,
    pub inland_per_cbm: f64,

    /// 货代杂费 = MAX(forwarder_min, 总体积 × forwarder_per_cbm)
    pub forwarder_min: f64,
    pub forwarder_per_cbm: f64,

    /// 商检费（检验检疫类别含 B）
    pub inspection_fee: f64,
    /// 检验检疫证书费（检验检疫类别含 B）
    pub certificate_fee: f64,
    /// 报关费（非 EXW）
    pub customs_fee: f64,

    /// 保险费 = 采购成本 × insurance_markup × insurance_rate（本币）
    pub insurance_markup: f64,
    pub insurance_rate: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            inland_min: 50.0,
            inland_per_cbm: 10.0,
            forwarder_min: 70.0,
            forwarder_per_cbm: 2.5,
            inspection_fee: 30.0,
            certificate_fee: 100.0,
            customs_fee: 30.0,
            insurance_markup: 1.1,
            insurance_rate: 0.005,
        }
    }
}

// ==========================================
// 银行费用（结算币种）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankFeeSchedule {
    /// 托收: clamp(采购成本 × rate, min, max) + surcharge
    pub collection_rate: f64,
    pub collection_min: f64,
    pub collection_max: f64,
    pub collection_surcharge: f64,

    /// 信用证: max(采购成本 × rate, min) + surcharge
    pub credit_rate: f64,
    pub credit_min: f64,
    pub credit_surcharge: f64,
}

impl Default for BankFeeSchedule {
    fn default() -> Self {
        Self {
            collection_rate: 0.001,
            collection_min: 15.0,
            collection_max: 285.0,
            collection_surcharge: 45.0,
            credit_rate: 0.00125,
            credit_min: 15.0,
            credit_surcharge: 75.0,
        }
    }
}

// ==========================================
// 拼箱限制（仅用于装运方式提示）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadThresholds {
    pub max_consolidated_weight_kg: f64,
    pub max_consolidated_volume_cbm: f64,
}

impl Default for LoadThresholds {
    fn default() -> Self {
        Self {
            max_consolidated_weight_kg: 25000.0,
            max_consolidated_volume_cbm: 33.0,
        }
    }
}

/// 选箱策略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectionPolicy {
    /// 每箱可装数是否向下取整后再计算箱数
    ///
    /// 默认 false：与预算表公式一致，直接使用未取整的比值
    pub floor_units_per_container: bool,
}

/// 箱型规格列表（目录顺序即并列时的优先顺序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerSpecs(pub Vec<ContainerSpec>);

impl Default for ContainerSpecs {
    fn default() -> Self {
        let spec = |code: &str, capacity_cbm: f64, weight_limit_kg: f64, is_refrigerated: bool| {
            ContainerSpec {
                code: code.to_string(),
                capacity_cbm,
                weight_limit_kg,
                is_refrigerated,
            }
        };

        Self(vec![
            spec("20'GP", 33.0, 25000.0, false),
            spec("40'GP", 67.0, 29000.0, false),
            spec("40'HC", 76.0, 29000.0, false),
            spec("20'RF", 27.0, 27400.0, true),
            spec("40'RF", 58.0, 27700.0, true),
            spec("40'RH", 67.0, 29000.0, true),
        ])
    }
}

// ==========================================
// 交易默认值（样例数据，仅在未指定时使用）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeDefaults {
    pub product_code: String,
    pub settlement_currency: String,
    pub quantity: i64,
    pub unit_purchase_price: f64,
    pub trade_term: String,
    pub payment_method: String,
    pub expected_profit_rate_percent: f64,
}

impl Default for TradeDefaults {
    fn default() -> Self {
        Self {
            product_code: "P010".to_string(),
            settlement_currency: "USD".to_string(),
            quantity: 182,
            unit_purchase_price: 4778.0,
            trade_term: "FOB".to_string(),
            payment_method: "T/T".to_string(),
            expected_profit_rate_percent: 15.0,
        }
    }
}
