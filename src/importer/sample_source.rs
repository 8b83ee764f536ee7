// ==========================================
// 出口预算表 - 内置样例数据源
// ==========================================
// 未指定基础资料文件时使用的样例表（自动售货机 / 上海-马尼拉航线）
// 也用作测试替身
// ==========================================

use crate::domain::reference::{ExchangeRateInfo, FreightRates, HsInfo, ProductInfo};
use crate::importer::data_source_trait::ReferenceDataSource;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::sheet_names;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct SampleDataSource {
    products: Vec<ProductInfo>,
    hs: Vec<HsInfo>,
    freight: FreightRates,
    exchange_rates: Vec<ExchangeRateInfo>,
}

impl SampleDataSource {
    pub fn new(
        products: Vec<ProductInfo>,
        hs: Vec<HsInfo>,
        freight: FreightRates,
        exchange_rates: Vec<ExchangeRateInfo>,
    ) -> Self {
        Self {
            products,
            hs,
            freight,
            exchange_rates,
        }
    }

    /// 替换运费单价表
    pub fn with_freight(mut self, freight: FreightRates) -> Self {
        self.freight = freight;
        self
    }

    /// 追加商品记录
    pub fn with_product(mut self, product: ProductInfo) -> Self {
        self.products.push(product);
        self
    }
}

impl Default for SampleDataSource {
    fn default() -> Self {
        Self::new(
            vec![ProductInfo {
                product_code: "P010".to_string(),
                name_cn: "自动售货机".to_string(),
                name_en: Some("Vending machine".to_string()),
                goods_type: Some("机器、机械器具、电气设备及其零件".to_string()),
                model: Some("型号：MF-782".to_string()),
                purchase_price: Some(3333.0),
                sales_unit: Some("台(SET)".to_string()),
                unit_conversion: "1 SET/PALLET".to_string(),
                package_unit: Some("托盘(PALLET)".to_string()),
                gross_weight: "280.00KGS/托盘".to_string(),
                net_weight: "220.00KGS/托盘".to_string(),
                volume: "2.55CBM/托盘".to_string(),
                transport_note: None,
                hs_code: Some("8476810000".to_string()),
            }],
            vec![HsInfo {
                hs_code: "8476810000".to_string(),
                name: Some("装有加热或制冷装置的自动售货机".to_string()),
                customs_condition: None,
                inspection_category: None,
                vat_rate_percent: 13.0,
                export_tax_rate_percent: 0.0,
                export_rebate_rate_percent: 13.0,
            }],
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
            },
            vec![ExchangeRateInfo {
                local_currency: "CNY".to_string(),
                settlement_currency: "USD".to_string(),
                rate: 6.9257,
            }],
        )
    }
}

#[async_trait]
impl ReferenceDataSource for SampleDataSource {
    async fn fetch_product(&self, product_code: &str) -> ImportResult<ProductInfo> {
        self.products
            .iter()
            .find(|p| p.product_code == product_code)
            .cloned()
            .ok_or_else(|| not_found(sheet_names::PRODUCT, product_code))
    }

    async fn fetch_hs(&self, hs_code: &str) -> ImportResult<HsInfo> {
        self.hs
            .iter()
            .find(|h| h.hs_code == hs_code)
            .cloned()
            .ok_or_else(|| not_found(sheet_names::HS, hs_code))
    }

    async fn fetch_freight_rates(&self) -> ImportResult<FreightRates> {
        Ok(self.freight.clone())
    }

    async fn fetch_exchange_rate(
        &self,
        settlement_currency: &str,
    ) -> ImportResult<ExchangeRateInfo> {
        self.exchange_rates
            .iter()
            .find(|r| r.settlement_currency.eq_ignore_ascii_case(settlement_currency))
            .cloned()
            .ok_or_else(|| not_found(sheet_names::EXCHANGE_RATE, settlement_currency))
    }
}

fn not_found(table: &str, key: &str) -> ImportError {
    ImportError::RecordNotFound {
        table: table.to_string(),
        key: key.to_string(),
    }
}
