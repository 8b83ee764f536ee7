// ==========================================
// 出口预算表 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 核算结果按输入内容哈希缓存，相同输入直接返回上次结果
// ==========================================

use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::api::{ApiError, ApiResult, BudgetApi, ShipmentForm};
use crate::config::ConfigManager;
use crate::domain::container::ContainerCatalogEntry;
use crate::domain::shipment::{ExtractionWarning, ShipmentSpec};
use crate::engine::BudgetReport;
use crate::importer::ReferenceDataSource;

/// 缓存默认容量
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

// ==========================================
// QuoteCache - 核算结果缓存
// ==========================================

/// 缓存键的组成部分
#[derive(Serialize)]
struct QuoteKey<'a> {
    spec: &'a ShipmentSpec,
    catalog: &'a [ContainerCatalogEntry],
    /// 按位编码，避免 NaN 与 None 序列化为同一个 null
    test_price_bits: Option<u64>,
    warnings: &'a [ExtractionWarning],
}

/// 核算结果缓存
///
/// 键为 (规格, 集装箱目录, 试算报价, 告警) 的内容哈希；容量满时整体清空
pub struct QuoteCache {
    entries: Mutex<HashMap<u64, Arc<BudgetReport>>>,
    capacity: usize,
}

impl QuoteCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// 计算内容哈希
    pub fn key(
        spec: &ShipmentSpec,
        catalog: &[ContainerCatalogEntry],
        test_price: Option<f64>,
        warnings: &[ExtractionWarning],
    ) -> ApiResult<u64> {
        let encoded = serde_json::to_string(&QuoteKey {
            spec,
            catalog,
            test_price_bits: test_price.map(f64::to_bits),
            warnings,
        })
        .map_err(|e| ApiError::InternalError(format!("缓存键序列化失败: {}", e)))?;

        let mut hasher = DefaultHasher::new();
        encoded.hash(&mut hasher);
        Ok(hasher.finish())
    }

    pub fn get(&self, key: u64) -> Option<Arc<BudgetReport>> {
        self.lock().get(&key).cloned()
    }

    pub fn insert(&self, key: u64, report: Arc<BudgetReport>) {
        let mut entries = self.lock();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            debug!(capacity = self.capacity, "核算缓存已满，清空");
            entries.clear();
        }
        entries.insert(key, report);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, Arc<BudgetReport>>> {
        // 缓存内容不会处于中间状态，毒化后继续使用
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

// ==========================================
// AppState - 应用状态
// ==========================================

/// 应用状态
///
/// 包含API实例和核算缓存
pub struct AppState {
    /// 预算核算API
    pub budget_api: Arc<BudgetApi>,

    /// 核算结果缓存
    pub quote_cache: QuoteCache,
}

impl AppState {
    pub fn new(
        config_manager: Arc<ConfigManager>,
        data_source: Arc<dyn ReferenceDataSource>,
    ) -> Self {
        info!(
            config = ?config_manager.source(),
            "初始化应用状态"
        );
        Self {
            budget_api: Arc::new(BudgetApi::new(config_manager, data_source)),
            quote_cache: QuoteCache::default(),
        }
    }

    /// 核算（命中缓存时返回上次结果）
    pub async fn compute(
        &self,
        form: &ShipmentForm,
        test_price: Option<f64>,
    ) -> ApiResult<Arc<BudgetReport>> {
        let (spec, warnings) = self.budget_api.validate(form)?;
        self.budget_api.validate_test_price(test_price)?;
        let catalog = self.budget_api.catalog().await?;

        let key = QuoteCache::key(&spec, &catalog, test_price, &warnings)?;
        if let Some(report) = self.quote_cache.get(key) {
            debug!(key, "命中核算缓存");
            return Ok(report);
        }

        let report = Arc::new(self.budget_api.run(&spec, &catalog, test_price, warnings)?);
        self.quote_cache.insert(key, Arc::clone(&report));
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetConfig;
    use crate::importer::SampleDataSource;

    fn state() -> AppState {
        let config = Arc::new(ConfigManager::new(BudgetConfig::default()).unwrap());
        AppState::new(config, Arc::new(SampleDataSource::default()))
    }

    #[tokio::test]
    async fn test_repeat_compute_hits_cache() {
        let state = state();
        let form = state.budget_api.load_form(None).await.unwrap();

        let first = state.compute(&form, None).await.unwrap();
        let second = state.compute(&form, None).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(state.quote_cache.len(), 1);
    }

    #[tokio::test]
    async fn test_changed_input_misses_cache() {
        let state = state();
        let mut form = state.budget_api.load_form(None).await.unwrap();

        let first = state.compute(&form, None).await.unwrap();
        form.quantity += 1;
        let second = state.compute(&form, None).await.unwrap();
        let third = state.compute(&form, Some(5000.0)).await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&second, &third));
        assert_eq!(state.quote_cache.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_cached() {
        let state = state();
        let mut form = state.budget_api.load_form(None).await.unwrap();
        form.quantity = 0;

        assert!(state.compute(&form, None).await.is_err());
        assert!(state.quote_cache.is_empty());
    }

    #[tokio::test]
    async fn test_nan_test_price_is_rejected_before_caching() {
        let state = state();
        let form = state.budget_api.load_form(None).await.unwrap();

        let result = state.compute(&form, Some(f64::NAN)).await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
        assert!(state.quote_cache.is_empty());

        // 未给出试算报价时按建议报价反算
        let report = state.compute(&form, None).await.unwrap();
        assert!(report.profit.is_some());
    }

    #[test]
    fn test_key_distinguishes_nan_from_missing_price() {
        let spec = crate::domain::shipment::fixtures::vending_machine_spec();
        let none = QuoteCache::key(&spec, &[], None, &[]).unwrap();
        let nan = QuoteCache::key(&spec, &[], Some(f64::NAN), &[]).unwrap();
        assert_ne!(none, nan);
    }

    #[test]
    fn test_cache_clears_when_full() {
        let cache = QuoteCache::new(2);
        let report = {
            let spec = crate::domain::shipment::fixtures::vending_machine_spec();
            Arc::new(
                crate::engine::BudgetOrchestrator::default()
                    .run(&spec, &[], None)
                    .unwrap(),
            )
        };

        cache.insert(1, Arc::clone(&report));
        cache.insert(2, Arc::clone(&report));
        cache.insert(3, report);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(3).is_some());
    }
}
