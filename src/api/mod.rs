// ==========================================
// 出口预算表 - API 层
// ==========================================
// 职责: 表单校验与核算入口，供命令行及应用状态调用
// ==========================================

pub mod budget_api;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use budget_api::BudgetApi;
pub use error::{ApiError, ApiResult};
pub use validator::{ShipmentForm, ShipmentValidator};
