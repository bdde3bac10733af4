// ==========================================
// 组培转接周排程系统 - 批次领域模型
// ==========================================
// 职责: 批次快照 (BatchRecord) + 判定后副本 (ClassifiedRecord)
// 红线: 输入快照不可变, 判定字段只写入副本
// ==========================================

use crate::domain::types::Pool;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// BatchRecord - 批次快照 (规范化后)
// ==========================================
// 由导入边界统一生成; 核心引擎只认这一种形态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub barcode: String, // 条码
    pub strain_code: String, // 品系代码
    pub medium_code: String, // 培养基代码
    pub location: String, // 存放位置 (培养室)
    pub jars: u32, // 瓶数
    pub age_weeks: Option<i32>, // 周龄 (None = 未知)
}

impl BatchRecord {
    pub fn new(
        barcode: impl Into<String>,
        strain_code: impl Into<String>,
        medium_code: impl Into<String>,
        location: impl Into<String>,
        jars: u32,
        age_weeks: Option<i32>,
    ) -> Self {
        Self {
            barcode: barcode.into(),
            strain_code: strain_code.into(),
            medium_code: medium_code.into(),
            location: location.into(),
            jars,
            age_weeks,
        }
    }
}

// ==========================================
// RawBatchRow - 导入原始行 (字段映射后, 派生前)
// ==========================================
// 瓶数 / 周龄可能缺失, 由派生服务补齐
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBatchRow {
    pub barcode: Option<String>,
    pub strain_code: Option<String>,
    pub medium_code: Option<String>,
    pub location: Option<String>,

    // 瓶数来源: 优先总瓶数, 否则 箱数 × 每箱瓶数 + 零头
    pub total_jars: Option<u32>,
    pub nb_boxes: Option<u32>,
    pub leftover_jars: Option<u32>,

    // 周龄来源: 显式周龄 > 接种日期 > 条码内嵌日期
    pub age_weeks: Option<i32>,
    pub plant_date: Option<NaiveDate>,

    // 元信息
    pub row_number: usize,
}

// ==========================================
// IneligibilityReason - 不可排原因
// ==========================================
// 判定顺序即枚举顺序, 首个命中即返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IneligibilityReason {
    ColdStorage,
    MediumNotEligible,
    UnknownAge,
    TooYoung { age_weeks: i32, threshold_weeks: u32 },
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::ColdStorage => write!(f, "cold storage"),
            IneligibilityReason::MediumNotEligible => write!(f, "medium not eligible"),
            IneligibilityReason::UnknownAge => write!(f, "unknown age"),
            IneligibilityReason::TooYoung {
                age_weeks,
                threshold_weeks,
            } => write!(f, "too young: {} < {} weeks", age_weeks, threshold_weeks),
        }
    }
}

// ==========================================
// ClassifiedRecord - 判定后副本
// ==========================================
// 适龄与否只由 ineligibility_reason 决定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub record: BatchRecord,
    pub ineligibility_reason: Option<IneligibilityReason>,
    pub pool: Option<Pool>,
}

impl ClassifiedRecord {
    /// 由判定结果构造副本
    pub fn new(
        record: BatchRecord,
        verdict: Result<(), IneligibilityReason>,
        pool: Option<Pool>,
    ) -> Self {
        Self {
            record,
            ineligibility_reason: verdict.err(),
            pool,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.ineligibility_reason.is_none()
    }

    /// 可进入排产: 适龄且已分配工位池
    pub fn is_schedulable(&self) -> bool {
        self.is_eligible() && self.pool.is_some()
    }
}
