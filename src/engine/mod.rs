// ==========================================
// 出口预算表 - 引擎层
// ==========================================
// 职责: 成本核算、集装箱优选、装运方式提示
// 红线: 引擎为纯函数，不做文件读取，不保存状态
// ==========================================

pub mod advisory;
pub mod container;
pub mod cost;
pub mod error;
pub mod number_extract;
pub mod orchestrator;

// 重导出核心引擎
pub use advisory::LoadAdvisor;
pub use container::{pick_best, ContainerSelector};
pub use cost::CostEngine;
pub use error::{EngineError, EngineResult};
pub use number_extract::{extract_number, try_extract_number};
pub use orchestrator::{BudgetOrchestrator, BudgetReport, FreightOutcome};
