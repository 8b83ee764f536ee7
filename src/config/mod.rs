// ==========================================
// 出口预算表 - 配置层
// ==========================================
// 职责: 费率常量、箱型规格、交易默认值的加载与校验
// 存储: JSON 配置文件，缺省为内置默认值
// ==========================================

pub mod budget_config;
pub mod config_manager;

// 重导出核心配置类型
pub use budget_config::{
    BankFeeSchedule, BudgetConfig, ContainerSpecs, FeeSchedule, LoadThresholds, SelectionPolicy,
    TradeDefaults,
};
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult};
