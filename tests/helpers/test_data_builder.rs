// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use replant_planner::config::PlannerConfig;
use replant_planner::domain::batch::BatchRecord;

/// 测试周的周一 (2025-09-22)
pub fn test_week_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 22).unwrap()
}

/// 测试参考日 (2025-09-19, 排程前的周五)
pub fn test_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 19).unwrap()
}

// ==========================================
// BatchRecord 构建器
// ==========================================

pub struct BatchBuilder {
    barcode: String,
    strain_code: String,
    medium_code: String,
    location: String,
    jars: u32,
    age_weeks: Option<i32>,
}

impl BatchBuilder {
    /// 默认: 品系 MUSA, 培养基 X, 培养室 CH1, 10 瓶, 12 周 (适龄, 通用组)
    pub fn new(barcode: &str) -> Self {
        Self {
            barcode: barcode.to_string(),
            strain_code: "MUSA".to_string(),
            medium_code: "X".to_string(),
            location: "CH1".to_string(),
            jars: 10,
            age_weeks: Some(12),
        }
    }

    pub fn strain(mut self, strain: &str) -> Self {
        self.strain_code = strain.to_string();
        self
    }

    pub fn medium(mut self, medium: &str) -> Self {
        self.medium_code = medium.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn jars(mut self, jars: u32) -> Self {
        self.jars = jars;
        self
    }

    pub fn age(mut self, weeks: i32) -> Self {
        self.age_weeks = Some(weeks);
        self
    }

    pub fn unknown_age(mut self) -> Self {
        self.age_weeks = None;
        self
    }

    pub fn build(self) -> BatchRecord {
        BatchRecord::new(
            self.barcode,
            self.strain_code,
            self.medium_code,
            self.location,
            self.jars,
            self.age_weeks,
        )
    }
}

// ==========================================
// PlannerConfig 构建
// ==========================================

/// 按时段产能构造配置
///
/// jars_per_worker_per_day = 2 时, 时段产能 = floor(人数 × 2 / 2) = 人数
pub fn config_with_cell_capacity(general: u32, specialized: u32) -> PlannerConfig {
    PlannerConfig {
        general_workers: general,
        specialized_workers: specialized,
        jars_per_worker_per_day: 2.0,
        reference_date: Some(test_reference_date()),
        week_start: Some(test_week_start()),
        ..PlannerConfig::default()
    }
}

/// 默认人员配置 (17 / 3 人, 每人每天 50 瓶), 日期固定
pub fn default_test_config() -> PlannerConfig {
    PlannerConfig {
        reference_date: Some(test_reference_date()),
        week_start: Some(test_week_start()),
        ..PlannerConfig::default()
    }
}
