// ==========================================
// 组培转接周排程系统 - Eligibility Core 纯函数库
// ==========================================
// 职责: 冷库识别、培养基准入、阈值选择、周龄比较的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::config::EligibilityThresholds;
use crate::domain::types::Medium;

/// 冷库位置标记 (大小写无关子串匹配)
pub const COLD_STORAGE_MARKERS: &[&str] = &["CHF", "FROID"];

/// 走短周期阈值的品系
pub const SHORT_CYCLE_STRAIN: &str = "BRAHY";

// ==========================================
// EligibilityCore - 纯函数工具类
// ==========================================
pub struct EligibilityCore;

impl EligibilityCore {
    /// 位置是否为冷库
    ///
    /// # 规则
    /// - location 大写后包含 "CHF" 或 "FROID"
    pub fn is_cold_storage(location: &str) -> bool {
        let upper = location.to_uppercase();
        COLD_STORAGE_MARKERS
            .iter()
            .any(|marker| upper.contains(marker))
    }

    /// 选择适龄阈值 (周)
    ///
    /// # 规则
    /// - strain = BRAHY (大小写无关) 且 medium ∈ {X, XM, E, E+} → brahy_weeks
    /// - 否则 → default_weeks
    pub fn select_threshold_weeks(
        strain_code: &str,
        medium: Medium,
        thresholds: &EligibilityThresholds,
    ) -> u32 {
        if strain_code.trim().eq_ignore_ascii_case(SHORT_CYCLE_STRAIN) && medium.is_short_cycle() {
            thresholds.brahy_weeks
        } else {
            thresholds.default_weeks
        }
    }

    /// 周龄是否达到阈值 (age ≥ threshold)
    pub fn is_old_enough(age_weeks: i32, threshold_weeks: u32) -> bool {
        age_weeks as i64 >= threshold_weeks as i64
    }
}
