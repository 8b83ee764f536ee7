// ==========================================
// 出口预算表 - 引擎层错误类型
// ==========================================

use thiserror::Error;

/// 引擎层错误
///
/// 每次核算为原子计算，出错时不返回部分结果
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 前置条件不满足（数量、汇率等）
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 没有任何箱型可装载该货物（与运费为 0 区分）
    #[error("无可行箱型: {reason}")]
    NoFeasibleOption { reason: String },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
