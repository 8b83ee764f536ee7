// ==========================================
// 出口预算表 - 基础资料表
// ==========================================
// 对应基础资料工作簿中的四张表:
// 商品信息表 / HS表 / 运费单价表 / 汇率表
// ==========================================

use crate::domain::container::ContainerCatalogEntry;
use serde::{Deserialize, Serialize};

/// 商品信息表记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub product_code: String,
    pub name_cn: String,
    pub name_en: Option<String>,
    pub goods_type: Option<String>,
    pub model: Option<String>,

    /// 采购单价（本币）
    pub purchase_price: Option<f64>,

    pub sales_unit: Option<String>,

    // ===== 以下为自由文本，核算前需提取数值 =====
    /// 单位换算，如 "1 SET/PALLET"
    pub unit_conversion: String,
    pub package_unit: Option<String>,
    /// 毛重，如 "280.00KGS/托盘"
    pub gross_weight: String,
    pub net_weight: String,
    /// 体积，如 "2.55CBM/托盘"
    pub volume: String,

    /// 运输说明（普通 / 冷藏 / 冷冻 / 无）
    pub transport_note: Option<String>,

    pub hs_code: Option<String>,
}

/// HS表记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsInfo {
    pub hs_code: String,
    pub name: Option<String>,
    /// 海关监管条件
    pub customs_condition: Option<String>,
    /// 检验检疫类别
    pub inspection_category: Option<String>,
    pub vat_rate_percent: f64,
    pub export_tax_rate_percent: f64,
    pub export_rebate_rate_percent: f64,
}

/// 运费单价表记录（单条航线，单箱运费 USD）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightRates {
    pub route: String,
    pub port_of_loading: Option<String>,
    pub port_of_destination: Option<String>,

    // ===== 普柜 =====
    pub gp20: f64,
    pub gp40: f64,
    pub hc40: f64,

    // ===== 冻柜 =====
    pub rf20: f64,
    pub rf40: f64,
    pub rh40: f64,
}

impl FreightRates {
    /// 按箱型代码取单价
    pub fn price_for(&self, code: &str) -> Option<f64> {
        match code {
            "20'GP" => Some(self.gp20),
            "40'GP" => Some(self.gp40),
            "40'HC" => Some(self.hc40),
            "20'RF" => Some(self.rf20),
            "40'RF" => Some(self.rf40),
            "40'RH" => Some(self.rh40),
            _ => None,
        }
    }

    /// 结合箱型物理规格生成集装箱目录
    ///
    /// 运费表中无对应单价的箱型被忽略，目录顺序与 specs 一致。
    pub fn to_catalog(&self, specs: &[ContainerSpec]) -> Vec<ContainerCatalogEntry> {
        specs
            .iter()
            .filter_map(|spec| {
                self.price_for(&spec.code).map(|price| ContainerCatalogEntry {
                    name: spec.code.clone(),
                    capacity_cbm: spec.capacity_cbm,
                    weight_limit_kg: spec.weight_limit_kg,
                    unit_price_usd: price,
                    is_refrigerated: spec.is_refrigerated,
                })
            })
            .collect()
    }
}

/// 箱型物理规格（不含运价）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub code: String,
    pub capacity_cbm: f64,
    pub weight_limit_kg: f64,
    pub is_refrigerated: bool,
}

/// 汇率表记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateInfo {
    /// 本币（英文代码），如 CNY
    pub local_currency: String,
    /// 结算币种（英文代码），如 USD
    pub settlement_currency: String,
    /// 1 单位结算币种折合本币
    pub rate: f64,
}

/// 一次抓取得到的全部基础资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBundle {
    pub product: ProductInfo,
    pub hs: HsInfo,
    pub freight: FreightRates,
    pub exchange_rate: ExchangeRateInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> FreightRates {
        FreightRates {
            route: "China-Shanghai to Philippines-Manila".to_string(),
            port_of_loading: Some("Shanghai".to_string()),
            port_of_destination: Some("Manila".to_string()),
            gp20: 1452.0,
            gp40: 2613.0,
            hc40: 3135.0,
            rf20: 2903.0,
            rf40: 5225.0,
            rh40: 6270.0,
        }
    }

    #[test]
    fn test_to_catalog_keeps_spec_order_and_skips_unknown_codes() {
        let specs = vec![
            ContainerSpec {
                code: "40'HC".to_string(),
                capacity_cbm: 76.0,
                weight_limit_kg: 29000.0,
                is_refrigerated: false,
            },
            ContainerSpec {
                code: "45'HC".to_string(),
                capacity_cbm: 86.0,
                weight_limit_kg: 29000.0,
                is_refrigerated: false,
            },
            ContainerSpec {
                code: "20'RF".to_string(),
                capacity_cbm: 27.0,
                weight_limit_kg: 27400.0,
                is_refrigerated: true,
            },
        ];

        let catalog = rates().to_catalog(&specs);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "40'HC");
        assert_eq!(catalog[0].unit_price_usd, 3135.0);
        assert_eq!(catalog[1].name, "20'RF");
        assert!(catalog[1].is_refrigerated);
    }
}
