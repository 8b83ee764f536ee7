// ==========================================
// 出口预算表 - 应用层
// ==========================================
// 职责: 组装配置、数据源与 API，持有核算缓存
// ==========================================

pub mod state;

// 重导出
pub use state::{AppState, QuoteCache, DEFAULT_CACHE_CAPACITY};
