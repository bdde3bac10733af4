// ==========================================
// 组培转接周排程系统 - 排程配置
// ==========================================
// 职责: 人员 / 产能 / 适龄阈值 / 日期锚点
// 红线: 配置必须在排程开始前完成校验, 核心引擎只接收合法配置
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::capacity::CapacityGrid;
use crate::domain::types::{Pool, Slot};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ==========================================
// 配置键 (JSON 字段名)
// ==========================================
pub mod config_keys {
    pub const GENERAL_WORKERS: &str = "general_workers";
    pub const SPECIALIZED_WORKERS: &str = "specialized_workers";
    pub const JARS_PER_WORKER_PER_DAY: &str = "jars_per_worker_per_day";
    pub const JARS_PER_BOX: &str = "jars_per_box";
    pub const BRAHY_THRESHOLD_WEEKS: &str = "brahy_threshold_weeks";
    pub const DEFAULT_THRESHOLD_WEEKS: &str = "default_threshold_weeks";
    pub const WEEK_START: &str = "week_start";
}

// ==========================================
// 默认值
// ==========================================
pub const DEFAULT_GENERAL_WORKERS: u32 = 17;
pub const DEFAULT_SPECIALIZED_WORKERS: u32 = 3;
pub const DEFAULT_JARS_PER_WORKER_PER_DAY: f64 = 50.0;
pub const DEFAULT_JARS_PER_BOX: u32 = 14;
pub const DEFAULT_BRAHY_THRESHOLD_WEEKS: u32 = 4;
pub const DEFAULT_THRESHOLD_WEEKS: u32 = 8;

// ==========================================
// EligibilityThresholds - 适龄阈值
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityThresholds {
    pub brahy_weeks: u32,
    pub default_weeks: u32,
}

impl Default for EligibilityThresholds {
    fn default() -> Self {
        Self {
            brahy_weeks: DEFAULT_BRAHY_THRESHOLD_WEEKS,
            default_weeks: DEFAULT_THRESHOLD_WEEKS,
        }
    }
}

// ==========================================
// PlannerConfig - 排程配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    // ===== 人员与产能 =====
    pub general_workers: u32,
    pub specialized_workers: u32,
    pub jars_per_worker_per_day: f64,
    pub jars_per_box: u32, // 仅用于按箱数折算瓶数

    // ===== 适龄阈值 (周) =====
    pub brahy_threshold_weeks: u32,
    pub default_threshold_weeks: u32,

    // ===== 日期锚点 =====
    pub reference_date: Option<NaiveDate>, // 缺省: 今天
    pub week_start: Option<NaiveDate>,     // 缺省: 参考日期所在周的周一
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            general_workers: DEFAULT_GENERAL_WORKERS,
            specialized_workers: DEFAULT_SPECIALIZED_WORKERS,
            jars_per_worker_per_day: DEFAULT_JARS_PER_WORKER_PER_DAY,
            jars_per_box: DEFAULT_JARS_PER_BOX,
            brahy_threshold_weeks: DEFAULT_BRAHY_THRESHOLD_WEEKS,
            default_threshold_weeks: DEFAULT_THRESHOLD_WEEKS,
            reference_date: None,
            week_start: None,
        }
    }
}

impl PlannerConfig {
    // ==========================================
    // 加载
    // ==========================================

    /// 从 JSON 文本加载并校验
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: PlannerConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并校验
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    // ==========================================
    // 校验
    // ==========================================

    /// 校验配置, 返回首个不合法字段
    pub fn validate(&self) -> ConfigResult<()> {
        if self.general_workers == 0 {
            return Err(invalid(config_keys::GENERAL_WORKERS, "通用组人数必须为正整数"));
        }
        if self.specialized_workers == 0 {
            return Err(invalid(
                config_keys::SPECIALIZED_WORKERS,
                "专项组人数必须为正整数",
            ));
        }
        if !self.jars_per_worker_per_day.is_finite() || self.jars_per_worker_per_day <= 0.0 {
            return Err(invalid(
                config_keys::JARS_PER_WORKER_PER_DAY,
                format!("人日产能必须为正数, 实际 {}", self.jars_per_worker_per_day),
            ));
        }
        if self.jars_per_box == 0 {
            return Err(invalid(config_keys::JARS_PER_BOX, "每箱瓶数必须为正整数"));
        }
        if self.brahy_threshold_weeks == 0 {
            return Err(invalid(
                config_keys::BRAHY_THRESHOLD_WEEKS,
                "BRAHY 阈值必须为正整数",
            ));
        }
        if self.default_threshold_weeks == 0 {
            return Err(invalid(
                config_keys::DEFAULT_THRESHOLD_WEEKS,
                "默认阈值必须为正整数",
            ));
        }
        if let Some(week_start) = self.week_start {
            if week_start.weekday() != Weekday::Mon {
                return Err(invalid(
                    config_keys::WEEK_START,
                    format!(
                        "周起始日必须为周一, 实际 {} ({:?})",
                        week_start,
                        week_start.weekday()
                    ),
                ));
            }
        }
        Ok(())
    }

    // ==========================================
    // 派生值
    // ==========================================

    pub fn thresholds(&self) -> EligibilityThresholds {
        EligibilityThresholds {
            brahy_weeks: self.brahy_threshold_weeks,
            default_weeks: self.default_threshold_weeks,
        }
    }

    pub fn workers(&self, pool: Pool) -> u32 {
        match pool {
            Pool::General => self.general_workers,
            Pool::Specialized => self.specialized_workers,
        }
    }

    /// 某工位池单个半日时段的产能
    pub fn half_day_capacity(&self, pool: Pool) -> u32 {
        CapacityGrid::half_day_capacity(self.workers(pool), self.jars_per_worker_per_day)
    }

    /// 为一次排程构造全新的产能网格
    pub fn build_capacity_grid(&self) -> CapacityGrid {
        CapacityGrid::new(
            self.half_day_capacity(Pool::General),
            self.half_day_capacity(Pool::Specialized),
        )
    }

    /// 参考日期 (缺省取本地今天)
    pub fn resolved_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// 周起始日 (缺省取参考日期所在周的周一)
    pub fn resolved_week_start(&self) -> NaiveDate {
        self.week_start
            .unwrap_or_else(|| monday_of(self.resolved_reference_date()))
    }
}

/// 所在周的周一
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// 时段对应的日历日期
pub fn slot_date(week_start: NaiveDate, slot: Slot) -> NaiveDate {
    week_start + Duration::days(slot.day.offset_days())
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}
