// ==========================================
// 出口预算表 - 基础资料数据源 Trait
// ==========================================
// 职责: 定义基础资料抓取接口（不包含实现）
// 实现者: WorkbookDataSource, SampleDataSource
// ==========================================

use crate::domain::reference::{
    ExchangeRateInfo, FreightRates, HsInfo, ProductInfo, ReferenceBundle,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::sheet_names;
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    /// 按商品编号查询商品信息表
    async fn fetch_product(&self, product_code: &str) -> ImportResult<ProductInfo>;

    /// 按 HS 编码查询 HS表
    async fn fetch_hs(&self, hs_code: &str) -> ImportResult<HsInfo>;

    /// 运费单价表（取第一条航线）
    async fn fetch_freight_rates(&self) -> ImportResult<FreightRates>;

    /// 按结算币种查询汇率表
    async fn fetch_exchange_rate(&self, settlement_currency: &str)
        -> ImportResult<ExchangeRateInfo>;

    /// 一次抓取全部基础资料
    ///
    /// # 流程
    /// 1. 查询商品（得到 HS 编码）
    /// 2. HS / 运费 / 汇率三张表并发抓取
    async fn fetch_bundle(
        &self,
        product_code: &str,
        settlement_currency: &str,
    ) -> ImportResult<ReferenceBundle> {
        let product = self.fetch_product(product_code).await?;
        let hs_code = product
            .hs_code
            .clone()
            .ok_or_else(|| ImportError::FieldMissing {
                table: sheet_names::PRODUCT.to_string(),
                row: 0,
                field: "HS编码".to_string(),
            })?;

        let (hs, freight, exchange_rate) = futures::try_join!(
            self.fetch_hs(&hs_code),
            self.fetch_freight_rates(),
            self.fetch_exchange_rate(settlement_currency),
        )?;

        debug!(
            product_code,
            hs_code = %hs.hs_code,
            route = %freight.route,
            rate = exchange_rate.rate,
            "基础资料抓取完成"
        );

        Ok(ReferenceBundle {
            product,
            hs,
            freight,
            exchange_rate,
        })
    }
}
