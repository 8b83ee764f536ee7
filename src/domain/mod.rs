// ==========================================
// 出口预算表 - 领域模型层
// ==========================================
// 职责: 定义货物规格、集装箱、预算结果、基础资料等领域类型
// 红线: 不含计算逻辑,不含文件读取
// ==========================================

pub mod budget;
pub mod container;
pub mod reference;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use budget::{BudgetCategory, BudgetLineItem, BudgetResult, DomesticFees, ProfitProjection};
pub use container::{ContainerCatalogEntry, ContainerOption, ContainerSelection, LoadAdvice};
pub use reference::{
    ContainerSpec, ExchangeRateInfo, FreightRates, HsInfo, ProductInfo, ReferenceBundle,
};
pub use shipment::{ExtractionWarning, ShipmentSpec, ShipmentTotals};
pub use types::{Currency, PaymentMethod, TradeTerm, TransportRequirement};
