// ==========================================
// 组培转接周排程系统 - 排程统计
// ==========================================
// 指标:
//   计数: 可排 / 已排 / 积压 / 无池 / 不可排
//   瓶数: 各池已排 / 积压瓶数
//   时段: used = initial - remaining, 利用率 = used / initial × 100
//   排产率: planned / eligible × 100
// 约定: 分母为 0 时百分比取 0
// ==========================================

use crate::config::slot_date;
use crate::domain::batch::ClassifiedRecord;
use crate::domain::capacity::{CapacityConstraint, CapacityGrid};
use crate::domain::schedule::{
    BacklogItem, CellUtilization, PlannedItem, PoolStatistics, ScheduleStatistics,
};
use crate::domain::types::Pool;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 汇总一次排程的统计
    ///
    /// # 参数
    /// - `classified`: 全量判定副本
    /// - `planned` / `backlog`: 排程器输出
    /// - `grid`: 排程结束后的产能网格
    /// - `week_start`: 周一日期
    pub fn aggregate(
        &self,
        classified: &[ClassifiedRecord],
        planned: &[PlannedItem],
        backlog: &[BacklogItem],
        grid: &CapacityGrid,
        week_start: NaiveDate,
    ) -> ScheduleStatistics {
        let total_eligible = classified.iter().filter(|c| c.is_eligible()).count();
        let total_unassigned = classified
            .iter()
            .filter(|c| c.is_eligible() && c.pool.is_none())
            .count();

        let pools = Pool::ALL
            .iter()
            .map(|&pool| self.pool_statistics(pool, planned, backlog, grid, week_start))
            .collect();

        ScheduleStatistics {
            total_records: classified.len(),
            total_eligible,
            total_ineligible: classified.len() - total_eligible,
            total_planned: planned.len(),
            total_backlog: backlog.len(),
            total_unassigned,
            planning_rate_pct: percentage(planned.len() as f64, total_eligible as f64),
            pools,
        }
    }

    fn pool_statistics(
        &self,
        pool: Pool,
        planned: &[PlannedItem],
        backlog: &[BacklogItem],
        grid: &CapacityGrid,
        week_start: NaiveDate,
    ) -> PoolStatistics {
        let pool_planned = planned.iter().filter(|p| p.pool == pool);
        let pool_backlog = backlog.iter().filter(|b| b.pool == pool);

        let cells: Vec<CellUtilization> = grid
            .pool_cells(pool)
            .map(|(slot, cell)| CellUtilization {
                pool,
                slot,
                date: slot_date(week_start, slot),
                initial_jars: cell.initial_jars,
                used_jars: cell.used_jars(),
                remaining_jars: cell.remaining_jars,
                utilization_pct: cell.utilization_pct(),
            })
            .collect();

        PoolStatistics {
            pool,
            planned_count: pool_planned.clone().count(),
            backlog_count: pool_backlog.clone().count(),
            planned_jars: pool_planned.map(|p| p.record.jars as u64).sum(),
            backlog_jars: pool_backlog.map(|b| b.record.jars as u64).sum(),
            capacity_jars: cells.iter().map(|c| c.initial_jars as u64).sum(),
            cells,
        }
    }
}

/// 百分比, 分母为 0 时返回 0
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}
