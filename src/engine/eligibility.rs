// ==========================================
// 组培转接周排程系统 - 适龄判定引擎
// ==========================================
// 红线: 冷库批次不得进入本周排程
// ==========================================
// 职责: 冷库过滤 + 培养基准入 + 周龄阈值判定
// 输入: BatchRecord + 阈值配置
// 输出: 可排 / 不可排原因 (首个命中即返回)
// ==========================================

use crate::config::EligibilityThresholds;
use crate::domain::batch::{BatchRecord, IneligibilityReason};
use crate::domain::types::Medium;
use crate::engine::EligibilityCore;
use tracing::instrument;

// ==========================================
// EligibilityClassifier - 适龄判定引擎
// ==========================================
// 红线: 只计算, 不修改输入快照
#[derive(Debug, Clone, Copy)]
pub struct EligibilityClassifier {
    thresholds: EligibilityThresholds,
}

impl EligibilityClassifier {
    /// 创建新的 EligibilityClassifier 实例
    ///
    /// # 参数
    /// - thresholds: BRAHY / 默认 周龄阈值
    pub fn new(thresholds: EligibilityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &EligibilityThresholds {
        &self.thresholds
    }

    /// 判定单个批次是否本周到期
    ///
    /// # 判定顺序 (首个命中即返回)
    /// 1. 位置为冷库 → ColdStorage
    /// 2. 培养基不在可排集合 → MediumNotEligible
    /// 3. 周龄未知 → UnknownAge
    /// 4. 选择阈值 (BRAHY 短周期 / 默认)
    /// 5. age ≥ threshold → 可排; 否则 TooYoung
    ///
    /// # 返回
    /// - Ok(()): 可排
    /// - Err(reason): 不可排原因
    #[instrument(level = "trace", skip(self, record), fields(barcode = %record.barcode))]
    pub fn evaluate(&self, record: &BatchRecord) -> Result<(), IneligibilityReason> {
        // === 步骤 1: 冷库 ===
        if EligibilityCore::is_cold_storage(&record.location) {
            return Err(IneligibilityReason::ColdStorage);
        }

        // === 步骤 2: 培养基 ===
        let medium =
            Medium::parse(&record.medium_code).ok_or(IneligibilityReason::MediumNotEligible)?;

        // === 步骤 3: 周龄 ===
        let age_weeks = record.age_weeks.ok_or(IneligibilityReason::UnknownAge)?;

        // === 步骤 4: 阈值 ===
        let threshold_weeks =
            EligibilityCore::select_threshold_weeks(&record.strain_code, medium, &self.thresholds);

        // === 步骤 5: 比较 ===
        if EligibilityCore::is_old_enough(age_weeks, threshold_weeks) {
            Ok(())
        } else {
            Err(IneligibilityReason::TooYoung {
                age_weeks,
                threshold_weeks,
            })
        }
    }
}

impl Default for EligibilityClassifier {
    fn default() -> Self {
        Self::new(EligibilityThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(strain: &str, medium: &str, location: &str, age: Option<i32>) -> BatchRecord {
        BatchRecord::new("735820250912AW2", strain, medium, location, 14, age)
    }

    #[test]
    fn test_brahy_short_cycle_medium_eligible_at_five_weeks() {
        let classifier = EligibilityClassifier::default();
        assert_eq!(classifier.evaluate(&record("BRAHY", "X", "C1", Some(5))), Ok(()));
    }

    #[test]
    fn test_brahy_on_rg_uses_default_threshold() {
        let classifier = EligibilityClassifier::default();
        let reason = classifier
            .evaluate(&record("BRAHY", "RG", "C1", Some(5)))
            .unwrap_err();
        assert_eq!(
            reason,
            IneligibilityReason::TooYoung {
                age_weeks: 5,
                threshold_weeks: 8
            }
        );
        assert_eq!(reason.to_string(), "too young: 5 < 8 weeks");
    }

    #[test]
    fn test_cold_storage_wins_over_everything() {
        let classifier = EligibilityClassifier::default();
        assert_eq!(
            classifier.evaluate(&record("MUSA", "X", "CHF2", Some(20))),
            Err(IneligibilityReason::ColdStorage)
        );
        // 培养基与周龄同样不合格时仍报冷库
        assert_eq!(
            classifier.evaluate(&record("MUSA", "MS", "froid", None)),
            Err(IneligibilityReason::ColdStorage)
        );
    }

    #[test]
    fn test_medium_checked_before_age() {
        let classifier = EligibilityClassifier::default();
        assert_eq!(
            classifier.evaluate(&record("MUSA", "MS", "C1", None)),
            Err(IneligibilityReason::MediumNotEligible)
        );
    }

    #[test]
    fn test_unknown_age() {
        let classifier = EligibilityClassifier::default();
        let reason = classifier
            .evaluate(&record("MUSA", "XS", "C1", None))
            .unwrap_err();
        assert_eq!(reason, IneligibilityReason::UnknownAge);
        assert_eq!(reason.to_string(), "unknown age");
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = EligibilityClassifier::new(EligibilityThresholds {
            brahy_weeks: 2,
            default_weeks: 6,
        });
        assert_eq!(classifier.evaluate(&record("brahy", "e+", "C1", Some(2))), Ok(()));
        assert_eq!(classifier.evaluate(&record("MUSA", "i", "C1", Some(6))), Ok(()));
        assert!(classifier.evaluate(&record("MUSA", "i", "C1", Some(5))).is_err());
    }
}
