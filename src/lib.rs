// ==========================================
// 出口预算表 - 核心库
// ==========================================
// 职责: 出口成本核算、集装箱优选、利润反算
// 输入: 基础资料（商品/HS/运费/汇率）+ 交易信息
// 输出: 出口预算报告（文本 / JSON）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 核算规则
pub mod engine;

// 导入层 - 基础资料
pub mod importer;

// 配置层 - 费率与默认值
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 校验与核算入口
pub mod api;

// 应用层 - 状态与缓存
pub mod app;

// 展示层 - 预算表文本
pub mod report;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Currency, PaymentMethod, TradeTerm, TransportRequirement};

// 领域实体
pub use domain::{
    BudgetCategory, BudgetLineItem, BudgetResult, ContainerCatalogEntry, ContainerOption,
    ContainerSelection, DomesticFees, ExtractionWarning, LoadAdvice, ProfitProjection,
    ReferenceBundle, ShipmentSpec, ShipmentTotals,
};

// 引擎
pub use engine::{
    BudgetOrchestrator, BudgetReport, ContainerSelector, CostEngine, EngineError, EngineResult,
    FreightOutcome, LoadAdvisor,
};

// API
pub use api::{ApiError, ApiResult, BudgetApi, ShipmentForm, ShipmentValidator};

// 应用
pub use app::{AppState, QuoteCache};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "出口预算表";
