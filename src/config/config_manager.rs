// ==========================================
// 出口预算表 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、快照
// 存储: JSON 文件（缺省时使用内置默认值）
// 查找顺序: 显式路径 > 环境变量 > 用户配置目录
// ==========================================

use crate::config::budget_config::BudgetConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置键与环境变量
pub mod config_keys {
    /// 配置文件路径环境变量
    pub const CONFIG_PATH_ENV: &str = "EXPORT_BUDGET_CONFIG";

    /// 用户配置目录下的子目录名
    pub const CONFIG_DIR_NAME: &str = "export-budget";

    /// 配置文件名
    pub const CONFIG_FILE_NAME: &str = "config.json";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: BudgetConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用给定配置创建（会做校验）
    pub fn new(config: BudgetConfig) -> ConfigResult<Self> {
        validate(&config)?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 加载配置
    ///
    /// # 参数
    /// - path: 显式配置文件路径；显式路径不存在时报错
    ///
    /// # 说明
    /// 未显式指定时依次查找环境变量与用户配置目录，文件不存在则使用默认值
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(p) = path {
            return Self::from_file(p);
        }

        if let Ok(env_path) = std::env::var(config_keys::CONFIG_PATH_ENV) {
            let env_path = env_path.trim();
            if !env_path.is_empty() {
                return Self::from_file(Path::new(env_path));
            }
        }

        match Self::default_config_path() {
            Some(p) if p.exists() => Self::from_file(&p),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Self::new(BudgetConfig::default())
            }
        }
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut manager = Self::from_json_str(&raw)?;
        manager.source = Some(path.to_path_buf());
        info!("已加载配置文件: {}", path.display());
        Ok(manager)
    }

    /// 从 JSON 字符串加载（未给出的字段取默认值）
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: BudgetConfig = serde_json::from_str(raw)?;
        Self::new(config)
    }

    /// 默认配置文件路径: <用户配置目录>/export-budget/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(config_keys::CONFIG_DIR_NAME)
                .join(config_keys::CONFIG_FILE_NAME)
        })
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    /// 配置来源文件（使用默认值时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获取当前配置快照（JSON）
    ///
    /// 用于随核算结果一并输出，保证结果可复现
    pub fn snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.config)?)
    }
}

// ==========================================
// 配置校验
// ==========================================
fn validate(config: &BudgetConfig) -> ConfigResult<()> {
    let fees = &config.fees;
    let non_negative = [
        ("fees.inland_min", fees.inland_min),
        ("fees.inland_per_cbm", fees.inland_per_cbm),
        ("fees.forwarder_min", fees.forwarder_min),
        ("fees.forwarder_per_cbm", fees.forwarder_per_cbm),
        ("fees.inspection_fee", fees.inspection_fee),
        ("fees.certificate_fee", fees.certificate_fee),
        ("fees.customs_fee", fees.customs_fee),
        ("fees.insurance_markup", fees.insurance_markup),
        ("fees.insurance_rate", fees.insurance_rate),
        ("bank_fees.collection_rate", config.bank_fees.collection_rate),
        ("bank_fees.collection_min", config.bank_fees.collection_min),
        ("bank_fees.collection_surcharge", config.bank_fees.collection_surcharge),
        ("bank_fees.credit_rate", config.bank_fees.credit_rate),
        ("bank_fees.credit_min", config.bank_fees.credit_min),
        ("bank_fees.credit_surcharge", config.bank_fees.credit_surcharge),
        (
            "load_thresholds.max_consolidated_weight_kg",
            config.load_thresholds.max_consolidated_weight_kg,
        ),
        (
            "load_thresholds.max_consolidated_volume_cbm",
            config.load_thresholds.max_consolidated_volume_cbm,
        ),
    ];

    for (key, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("必须为非负数，实际 {}", value),
            });
        }
    }

    if config.bank_fees.collection_max < config.bank_fees.collection_min {
        return Err(ConfigError::InvalidValue {
            key: "bank_fees.collection_max".to_string(),
            message: format!(
                "上限 {} 小于下限 {}",
                config.bank_fees.collection_max, config.bank_fees.collection_min
            ),
        });
    }

    if config.container_specs.0.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "container_specs".to_string(),
            message: "箱型列表不能为空".to_string(),
        });
    }

    for spec in &config.container_specs.0 {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(spec.capacity_cbm) || !positive(spec.weight_limit_kg) {
            return Err(ConfigError::InvalidValue {
                key: format!("container_specs[{}]", spec.code),
                message: "容积与限重必须大于 0".to_string(),
            });
        }
    }

    Ok(())
}
