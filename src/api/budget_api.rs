// ==========================================
// 出口预算表 - 预算核算 API
// ==========================================
// 职责: 抓取基础资料 → 生成表单 → 校验 → 编排引擎核算
// ==========================================

use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::error::ApiResult;
use crate::api::validator::{ShipmentForm, ShipmentValidator};
use crate::config::ConfigManager;
use crate::domain::container::{ContainerCatalogEntry, ContainerSelection};
use crate::domain::shipment::{ExtractionWarning, ShipmentSpec};
use crate::engine::{BudgetOrchestrator, BudgetReport, ContainerSelector};
use crate::importer::ReferenceDataSource;

// ==========================================
// BudgetApi - 预算核算 API
// ==========================================

/// 预算核算API
///
/// 职责：
/// 1. 按商品编号抓取基础资料并生成录入表单
/// 2. 由运费单价表 + 箱型规格生成集装箱目录
/// 3. 校验表单并执行核算
pub struct BudgetApi {
    config_manager: Arc<ConfigManager>,
    data_source: Arc<dyn ReferenceDataSource>,
    validator: ShipmentValidator,
    selector: ContainerSelector,
    orchestrator: BudgetOrchestrator,
}

impl BudgetApi {
    pub fn new(
        config_manager: Arc<ConfigManager>,
        data_source: Arc<dyn ReferenceDataSource>,
    ) -> Self {
        let selector = ContainerSelector::from_config(config_manager.config());
        let orchestrator = BudgetOrchestrator::from_config(config_manager.config());
        Self {
            config_manager,
            data_source,
            validator: ShipmentValidator,
            selector,
            orchestrator,
        }
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    /// 抓取基础资料并生成录入表单
    ///
    /// # 参数
    /// - product_code: 商品编号；None 时使用配置中的默认商品
    #[instrument(skip(self))]
    pub async fn load_form(&self, product_code: Option<&str>) -> ApiResult<ShipmentForm> {
        let defaults = &self.config_manager.config().trade_defaults;
        let code = product_code.unwrap_or(defaults.product_code.as_str());

        let bundle = self
            .data_source
            .fetch_bundle(code, &defaults.settlement_currency)
            .await?;

        info!(
            product_code = code,
            name = %bundle.product.name_cn,
            route = %bundle.freight.route,
            "基础资料已加载"
        );
        Ok(ShipmentForm::from_bundle(&bundle, defaults))
    }

    /// 集装箱目录（运费单价表 × 箱型规格）
    pub async fn catalog(&self) -> ApiResult<Vec<ContainerCatalogEntry>> {
        let freight = self.data_source.fetch_freight_rates().await?;
        let specs = &self.config_manager.config().container_specs.0;
        Ok(freight.to_catalog(specs))
    }

    /// 校验表单
    pub fn validate(&self, form: &ShipmentForm) -> ApiResult<(ShipmentSpec, Vec<ExtractionWarning>)> {
        self.validator.validate(form)
    }

    /// 校验试算报价
    pub fn validate_test_price(&self, test_price: Option<f64>) -> ApiResult<()> {
        self.validator.validate_test_price(test_price)
    }

    /// 仅做集装箱优选（不核算成本）
    ///
    /// # 返回
    /// - Ok(ContainerSelection): 单位运费最低的箱型
    /// - Err(ApiError::NoFeasibleOption): 没有箱型可装载该货物
    #[instrument(skip(self, form), fields(product_code = %form.product_code))]
    pub async fn select_container(&self, form: &ShipmentForm) -> ApiResult<ContainerSelection> {
        let (spec, _) = self.validate(form)?;
        let catalog = self.catalog().await?;
        Ok(self.selector.select_best(&spec, &catalog)?)
    }

    /// 对已校验的规格执行核算
    pub fn run(
        &self,
        spec: &ShipmentSpec,
        catalog: &[ContainerCatalogEntry],
        test_price: Option<f64>,
        warnings: Vec<ExtractionWarning>,
    ) -> ApiResult<BudgetReport> {
        self.validator.validate_test_price(test_price)?;
        let mut report = self.orchestrator.run(spec, catalog, test_price)?;
        report.warnings = warnings;
        Ok(report)
    }

    /// 校验 + 核算
    ///
    /// # 参数
    /// - form: 录入表单
    /// - test_price: 试算报价（结算币种）；None 时使用建议报价
    #[instrument(skip(self, form), fields(product_code = %form.product_code))]
    pub async fn compute(
        &self,
        form: &ShipmentForm,
        test_price: Option<f64>,
    ) -> ApiResult<BudgetReport> {
        let (spec, warnings) = self.validate(form)?;
        self.validator.validate_test_price(test_price)?;
        let catalog = self.catalog().await?;
        self.run(&spec, &catalog, test_price, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::config::BudgetConfig;
    use crate::engine::FreightOutcome;
    use crate::importer::SampleDataSource;

    fn api() -> BudgetApi {
        let config = Arc::new(ConfigManager::new(BudgetConfig::default()).unwrap());
        BudgetApi::new(config, Arc::new(SampleDataSource::default()))
    }

    #[tokio::test]
    async fn test_load_form_uses_defaults() {
        let form = api().load_form(None).await.unwrap();
        assert_eq!(form.product_code, "P010");
        assert_eq!(form.quantity, 182);
        assert_eq!(form.unit_purchase_price, 4778.0);
        assert_eq!(form.exchange_rate, 6.9257);
        assert_eq!(form.volume, "2.55CBM/托盘");
    }

    #[tokio::test]
    async fn test_catalog_from_sample_rates() {
        let catalog = api().catalog().await.unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog[0].name, "20'GP");
        assert_eq!(catalog[0].unit_price_usd, 1452.0);
        assert_eq!(catalog[5].name, "40'RH");
        assert_eq!(catalog[5].unit_price_usd, 6270.0);
    }

    #[tokio::test]
    async fn test_compute_end_to_end() {
        let api = api();
        let form = api.load_form(Some("P010")).await.unwrap();
        let report = api.compute(&form, None).await.unwrap();

        assert!(matches!(report.freight, FreightOutcome::Selected(_)));
        assert!(report.warnings.is_empty());
        assert!(report.budget.suggested_unit_price > 0.0);
    }

    #[tokio::test]
    async fn test_compute_attaches_warnings() {
        let api = api();
        let mut form = api.load_form(None).await.unwrap();
        form.net_weight = "待定".to_string();

        let report = api.compute(&form, None).await.unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.spec.unit_net_weight_kg, 0.0);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let result = api().load_form(Some("P999")).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
