// ==========================================
// 组培转接周排程系统 - 贪心时段填充引擎
// ==========================================
// 红线: 产能约束优先于批次优先级, 批次不可拆分
// ==========================================
// 职责: 按品系组优先级把批次放入首个容量足够的时段
// 输入: 已排序品系组 + 该池产能网格 (独占)
// 输出: 已排清单 + 积压清单, 网格 remaining 同步扣减
// ==========================================

use crate::config::slot_date;
use crate::domain::batch::BatchRecord;
use crate::domain::capacity::CapacityGrid;
use crate::domain::schedule::{BacklogItem, BacklogReason, PlannedItem, ScheduleGrid};
use crate::domain::types::Pool;
use crate::engine::strain_grouper::StrainGroup;
use chrono::NaiveDate;
use tracing::{debug, instrument};

// ==========================================
// PoolPlacement - 单池填充结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct PoolPlacement {
    pub planned: Vec<PlannedItem>,
    pub backlog: Vec<BacklogItem>,
}

// ==========================================
// GreedyScheduler - 贪心填充引擎
// ==========================================
pub struct GreedyScheduler {
    week_start: NaiveDate,
}

impl GreedyScheduler {
    /// 构造函数
    ///
    /// # 参数
    /// - `week_start`: 周一日期, 用于给已排批次标注日历日期
    pub fn new(week_start: NaiveDate) -> Self {
        Self { week_start }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 填充单个工位池
    ///
    /// 规则:
    /// 1) 品系组按给定顺序处理, 组内按给定顺序处理
    /// 2) 每条批次按时间顺序扫描 10 个时段, 放入首个 remaining ≥ jars 的时段
    /// 3) 无时段可放 → 积压 (insufficient capacity), 本次运行不再重试
    /// 4) 不回溯, 不拆分
    ///
    /// # 参数
    /// - `pool`: 工位池
    /// - `groups`: 已排序的品系组
    /// - `grid`: 本次运行独占的产能网格 (会被修改)
    /// - `schedule`: 周历网格 (会被追加)
    #[instrument(skip(self, groups, grid, schedule), fields(
        pool = %pool,
        groups_count = groups.len()
    ))]
    pub fn schedule_pool(
        &self,
        pool: Pool,
        groups: Vec<StrainGroup>,
        grid: &mut CapacityGrid,
        schedule: &mut ScheduleGrid,
    ) -> PoolPlacement {
        let mut placement = PoolPlacement::default();

        for group in groups {
            debug!(
                strain = %group.strain_code,
                mean_age_weeks = group.mean_age_weeks,
                records = group.records.len(),
                total_jars = group.total_jars,
                "处理品系组"
            );
            for record in group.records {
                self.place_record(pool, record, grid, schedule, &mut placement);
            }
        }

        placement
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn place_record(
        &self,
        pool: Pool,
        record: BatchRecord,
        grid: &mut CapacityGrid,
        schedule: &mut ScheduleGrid,
        placement: &mut PoolPlacement,
    ) {
        let slot = match grid.first_fit(pool, record.jars) {
            Some(slot) if grid.try_place(pool, slot, record.jars) => slot,
            _ => {
                debug!(barcode = %record.barcode, jars = record.jars, "产能不足, 进入积压");
                placement.backlog.push(BacklogItem {
                    record,
                    pool,
                    reason: BacklogReason::InsufficientCapacity,
                });
                return;
            }
        };

        debug!(
            barcode = %record.barcode,
            jars = record.jars,
            slot = %slot,
            remaining = grid.remaining(pool, slot),
            "批次已落位"
        );
        schedule.push(pool, slot, record.clone());
        placement.planned.push(PlannedItem {
            record,
            pool,
            slot,
            date: slot_date(self.week_start, slot),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{HalfDay, Slot, WorkDay};
    use crate::engine::StrainGrouper;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
    }

    fn rec(barcode: &str, strain: &str, jars: u32, age: i32) -> BatchRecord {
        BatchRecord::new(barcode, strain, "X", "C1", jars, Some(age))
    }

    #[test]
    fn test_zero_capacity_sends_everything_to_backlog() {
        let scheduler = GreedyScheduler::new(monday());
        let mut grid = CapacityGrid::new(0, 0);
        let mut schedule = ScheduleGrid::new();
        let groups = StrainGrouper::new().group(vec![rec("A", "S", 1, 9), rec("B", "S", 2, 9)]);

        let placement = scheduler.schedule_pool(Pool::General, groups, &mut grid, &mut schedule);
        assert!(placement.planned.is_empty());
        assert_eq!(placement.backlog.len(), 2);
        assert_eq!(
            placement.backlog[0].reason.to_string(),
            "insufficient capacity"
        );
    }

    #[test]
    fn test_planned_item_carries_calendar_date() {
        let scheduler = GreedyScheduler::new(monday());
        let mut grid = CapacityGrid::new(10, 0);
        let mut schedule = ScheduleGrid::new();
        // 10 个时段各放满一条, 第 11 条积压
        let records: Vec<BatchRecord> = (0..11)
            .map(|i| rec(&format!("B{:02}", i), "S", 10, 9))
            .collect();
        let groups = StrainGrouper::new().group(records);

        let placement = scheduler.schedule_pool(Pool::General, groups, &mut grid, &mut schedule);
        assert_eq!(placement.planned.len(), 10);
        assert_eq!(placement.backlog.len(), 1);
        assert_eq!(placement.backlog[0].record.barcode, "B10");

        let last = &placement.planned[9];
        assert_eq!(last.slot, Slot::new(WorkDay::Friday, HalfDay::Afternoon));
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2025, 9, 19).unwrap());
        assert_eq!(
            schedule.records(Pool::General, last.slot)[0].barcode,
            "B09"
        );
    }

    #[test]
    fn test_smaller_later_record_backfills_earlier_cell() {
        let scheduler = GreedyScheduler::new(monday());
        let mut grid = CapacityGrid::new(100, 0);
        let mut schedule = ScheduleGrid::new();
        let groups = StrainGrouper::new().group(vec![
            rec("OLD", "A", 70, 12),
            rec("MID", "B", 50, 10),
            rec("SMALL", "C", 30, 9),
        ]);

        let placement = scheduler.schedule_pool(Pool::General, groups, &mut grid, &mut schedule);
        let mon_am = Slot::new(WorkDay::Monday, HalfDay::Morning);
        let mon_pm = Slot::new(WorkDay::Monday, HalfDay::Afternoon);
        assert_eq!(placement.planned[0].slot, mon_am);
        assert_eq!(placement.planned[1].slot, mon_pm);
        assert_eq!(placement.planned[2].slot, mon_am);
        assert_eq!(grid.remaining(Pool::General, mon_am), 0);
    }
}
