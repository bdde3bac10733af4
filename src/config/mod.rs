// ==========================================
// 组培转接周排程系统 - 配置层
// ==========================================
// 职责: 排程配置加载与校验
// 存储: JSON 文件 (可选), 缺省值见 planner_config
// ==========================================

pub mod error;
pub mod planner_config;

// 重导出核心配置
pub use error::{ConfigError, ConfigResult};
pub use planner_config::{
    config_keys, monday_of, slot_date, EligibilityThresholds, PlannerConfig,
};
