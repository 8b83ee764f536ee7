// ==========================================
// 出口预算表 - API层错误类型
// ==========================================
// 职责: 汇总引擎/导入/配置错误，转换为用户可读的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("无可行箱型: {0}")]
    NoFeasibleOption(String),

    // ==========================================
    // 基础资料错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("基础资料读取失败: {0}")]
    ImportError(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从引擎错误转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            EngineError::NoFeasibleOption { reason } => ApiError::NoFeasibleOption(reason),
        }
    }
}

// ==========================================
// 从导入错误转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::RecordNotFound { table, key } => {
                ApiError::NotFound(format!("{}中不存在 {}", table, key))
            }
            ImportError::Other(err) => ApiError::Other(err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
