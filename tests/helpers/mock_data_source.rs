// ==========================================
// Mock 基础资料数据源 - 用于集成测试
// ==========================================
// 委托内置样例数据，并统计各表的抓取次数；可注入运费表失败
// ==========================================

use async_trait::async_trait;
use export_budget::domain::reference::{ExchangeRateInfo, FreightRates, HsInfo, ProductInfo};
use export_budget::importer::{ImportError, ImportResult, ReferenceDataSource, SampleDataSource};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct MockDataSource {
    inner: SampleDataSource,
    fail_freight: bool,
    pub product_calls: AtomicUsize,
    pub hs_calls: AtomicUsize,
    pub freight_calls: AtomicUsize,
    pub rate_calls: AtomicUsize,
}

impl MockDataSource {
    pub fn new(inner: SampleDataSource) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// 运费单价表抓取失败
    pub fn failing_freight() -> Self {
        Self {
            fail_freight: true,
            ..Self::default()
        }
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReferenceDataSource for MockDataSource {
    async fn fetch_product(&self, product_code: &str) -> ImportResult<ProductInfo> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_product(product_code).await
    }

    async fn fetch_hs(&self, hs_code: &str) -> ImportResult<HsInfo> {
        self.hs_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_hs(hs_code).await
    }

    async fn fetch_freight_rates(&self) -> ImportResult<FreightRates> {
        self.freight_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_freight {
            return Err(ImportError::SheetNotFound("运费单价表".to_string()));
        }
        self.inner.fetch_freight_rates().await
    }

    async fn fetch_exchange_rate(
        &self,
        settlement_currency: &str,
    ) -> ImportResult<ExchangeRateInfo> {
        self.rate_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_exchange_rate(settlement_currency).await
    }
}
