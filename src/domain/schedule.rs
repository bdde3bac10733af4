// ==========================================
// 组培转接周排程系统 - 排程结果领域模型
// ==========================================
// 职责: 已排清单 / 积压清单 / 统计 / 周历网格
// 说明: 全部为派生数据, 单次运行内有效, 不落库
// ==========================================

use crate::domain::batch::{BatchRecord, ClassifiedRecord, IneligibilityReason};
use crate::domain::types::{HalfDay, Pool, Slot, WorkDay, CELLS_PER_POOL, POOL_COUNT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// PlannedItem - 已排批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedItem {
    pub record: BatchRecord,
    pub pool: Pool,
    pub slot: Slot,
    pub date: NaiveDate, // 时段对应的日历日期
}

impl PlannedItem {
    pub fn day(&self) -> WorkDay {
        self.slot.day
    }

    pub fn half(&self) -> HalfDay {
        self.slot.half
    }
}

// ==========================================
// BacklogReason - 积压原因
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklogReason {
    InsufficientCapacity,
}

impl fmt::Display for BacklogReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BacklogReason::InsufficientCapacity => write!(f, "insufficient capacity"),
        }
    }
}

// ==========================================
// BacklogItem - 积压批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklogItem {
    pub record: BatchRecord,
    pub pool: Pool,
    pub reason: BacklogReason,
}

// ==========================================
// IneligibleItem - 本周不可排批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IneligibleItem {
    pub record: BatchRecord,
    pub reason: IneligibilityReason,
}

// ==========================================
// CellUtilization - 单格利用率
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellUtilization {
    pub pool: Pool,
    pub slot: Slot,
    pub date: NaiveDate,
    pub initial_jars: u32,
    pub used_jars: u32,
    pub remaining_jars: u32,
    pub utilization_pct: f64,
}

// ==========================================
// PoolStatistics - 单池统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolStatistics {
    pub pool: Pool,
    pub planned_count: usize,
    pub backlog_count: usize,
    pub planned_jars: u64,
    pub backlog_jars: u64,
    pub capacity_jars: u64,
    pub cells: Vec<CellUtilization>,
}

// ==========================================
// ScheduleStatistics - 汇总统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    pub total_records: usize,
    pub total_eligible: usize,
    pub total_ineligible: usize,
    pub total_planned: usize,
    pub total_backlog: usize,
    pub total_unassigned: usize,
    pub planning_rate_pct: f64, // planned / eligible × 100, eligible=0 时为 0
    pub pools: Vec<PoolStatistics>,
}

impl ScheduleStatistics {
    pub fn pool(&self, pool: Pool) -> Option<&PoolStatistics> {
        self.pools.iter().find(|p| p.pool == pool)
    }

    /// 某池已排瓶数 (无该池统计时为 0)
    pub fn planned_jars(&self, pool: Pool) -> u64 {
        self.pool(pool).map(|p| p.planned_jars).unwrap_or(0)
    }
}

// ==========================================
// ScheduleGrid - 周历网格 (池 × 时段 → 批次列表)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    cells: [[Vec<BatchRecord>; CELLS_PER_POOL]; POOL_COUNT],
}

impl ScheduleGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pool: Pool, slot: Slot, record: BatchRecord) {
        self.cells[pool.index()][slot.index()].push(record);
    }

    /// 指定时段已排批次 (按放入顺序)
    pub fn records(&self, pool: Pool, slot: Slot) -> &[BatchRecord] {
        &self.cells[pool.index()][slot.index()]
    }

    /// 指定时段已排瓶数
    pub fn placed_jars(&self, pool: Pool, slot: Slot) -> u64 {
        self.records(pool, slot).iter().map(|r| r.jars as u64).sum()
    }
}

// ==========================================
// ScheduleResult - 单次排程结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub week_start: NaiveDate,
    pub grid: ScheduleGrid,
    pub planned: Vec<PlannedItem>,
    pub backlog: Vec<BacklogItem>,
    pub unassigned: Vec<BatchRecord>, // 适龄但无工位池
    pub ineligible: Vec<IneligibleItem>,
    pub classified: Vec<ClassifiedRecord>, // 全量判定副本 (输入顺序)
    pub statistics: ScheduleStatistics,
}
