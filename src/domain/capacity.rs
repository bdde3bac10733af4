// ==========================================
// 组培转接周排程系统 - 产能网格领域模型
// ==========================================
// 结构: 工位池 × 时段格 (2 × 10) 的定长表
// 红线: 剩余产能永不为负, 只按单条批次的完整瓶数扣减
// ==========================================

use crate::domain::types::{Pool, Slot, CELLS_PER_POOL, POOL_COUNT};
use serde::{Deserialize, Serialize};

// ==========================================
// CapacityCell - 单个时段格
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapacityCell {
    pub initial_jars: u32,   // 初始产能 (瓶)
    pub remaining_jars: u32, // 剩余产能 (瓶)
}

impl CapacityCell {
    pub fn new(initial_jars: u32) -> Self {
        Self {
            initial_jars,
            remaining_jars: initial_jars,
        }
    }
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: GreedyScheduler 约束检查接口
pub trait CapacityConstraint {
    /// 检查是否可整体放入 (jars ≤ remaining)
    fn can_place(&self, jars: u32) -> bool;

    /// 已用产能
    fn used_jars(&self) -> u32;

    /// 利用率 (%), 初始产能为 0 时定义为 0
    fn utilization_pct(&self) -> f64;
}

impl CapacityConstraint for CapacityCell {
    fn can_place(&self, jars: u32) -> bool {
        jars <= self.remaining_jars
    }

    fn used_jars(&self) -> u32 {
        self.initial_jars - self.remaining_jars
    }

    fn utilization_pct(&self) -> f64 {
        if self.initial_jars == 0 {
            return 0.0;
        }
        self.used_jars() as f64 / self.initial_jars as f64 * 100.0
    }
}

// ==========================================
// CapacityGrid - 周产能网格
// ==========================================
// 每次排程独占一份, 显式传入排程器; 不存在全局共享状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityGrid {
    cells: [[CapacityCell; CELLS_PER_POOL]; POOL_COUNT],
}

impl CapacityGrid {
    /// 按各池单格产能构造网格
    ///
    /// # 参数
    /// - `general_cell_jars`: 通用组每个半日时段的产能
    /// - `specialized_cell_jars`: 专项组每个半日时段的产能
    pub fn new(general_cell_jars: u32, specialized_cell_jars: u32) -> Self {
        let mut cells = [[CapacityCell::default(); CELLS_PER_POOL]; POOL_COUNT];
        cells[Pool::General.index()] = [CapacityCell::new(general_cell_jars); CELLS_PER_POOL];
        cells[Pool::Specialized.index()] =
            [CapacityCell::new(specialized_cell_jars); CELLS_PER_POOL];
        Self { cells }
    }

    /// 半日时段产能 = floor(人数 × 人日产能 / 2)
    pub fn half_day_capacity(workers: u32, jars_per_worker_per_day: f64) -> u32 {
        let raw = (workers as f64 * jars_per_worker_per_day / 2.0).floor();
        if raw.is_finite() && raw > 0.0 {
            raw.min(u32::MAX as f64) as u32
        } else {
            0
        }
    }

    pub fn cell(&self, pool: Pool, slot: Slot) -> &CapacityCell {
        &self.cells[pool.index()][slot.index()]
    }

    pub fn remaining(&self, pool: Pool, slot: Slot) -> u32 {
        self.cell(pool, slot).remaining_jars
    }

    /// 在指定时段放入 `jars` 瓶
    ///
    /// # 返回
    /// - `true`: 已扣减 remaining
    /// - `false`: 产能不足, 网格不变
    pub fn try_place(&mut self, pool: Pool, slot: Slot, jars: u32) -> bool {
        let cell = &mut self.cells[pool.index()][slot.index()];
        if !cell.can_place(jars) {
            return false;
        }
        cell.remaining_jars -= jars;
        true
    }

    /// 按时间顺序查找首个可整体容纳 `jars` 的时段
    pub fn first_fit(&self, pool: Pool, jars: u32) -> Option<Slot> {
        Slot::chronological().find(|slot| self.cell(pool, *slot).can_place(jars))
    }

    /// 遍历某工位池的全部时段 (时间顺序)
    pub fn pool_cells(&self, pool: Pool) -> impl Iterator<Item = (Slot, &CapacityCell)> + '_ {
        Slot::chronological().map(move |slot| (slot, self.cell(pool, slot)))
    }

    /// 某工位池本周总剩余产能
    pub fn total_remaining(&self, pool: Pool) -> u64 {
        self.cells[pool.index()]
            .iter()
            .map(|c| c.remaining_jars as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{HalfDay, WorkDay};

    #[test]
    fn test_half_day_capacity_floors() {
        assert_eq!(CapacityGrid::half_day_capacity(17, 50.0), 425);
        assert_eq!(CapacityGrid::half_day_capacity(3, 50.0), 75);
        assert_eq!(CapacityGrid::half_day_capacity(3, 25.0), 37);
        assert_eq!(CapacityGrid::half_day_capacity(0, 50.0), 0);
    }

    #[test]
    fn test_try_place_exact_fit_drives_remaining_to_zero() {
        let mut grid = CapacityGrid::new(100, 10);
        let slot = Slot::new(WorkDay::Monday, HalfDay::Morning);

        assert!(grid.try_place(Pool::General, slot, 100));
        assert_eq!(grid.remaining(Pool::General, slot), 0);
        assert!(!grid.try_place(Pool::General, slot, 1));
        assert_eq!(grid.remaining(Pool::General, slot), 0);
        // 另一池不受影响
        assert_eq!(grid.remaining(Pool::Specialized, slot), 10);
    }

    #[test]
    fn test_first_fit_scans_chronologically() {
        let mut grid = CapacityGrid::new(50, 0);
        let mon_am = Slot::new(WorkDay::Monday, HalfDay::Morning);
        assert!(grid.try_place(Pool::General, mon_am, 30));

        assert_eq!(grid.first_fit(Pool::General, 20), Some(mon_am));
        assert_eq!(
            grid.first_fit(Pool::General, 21),
            Some(Slot::new(WorkDay::Monday, HalfDay::Afternoon))
        );
        assert_eq!(grid.first_fit(Pool::General, 51), None);
        assert_eq!(grid.first_fit(Pool::Specialized, 1), None);
        // 零瓶批次总能放入首格
        assert_eq!(grid.first_fit(Pool::Specialized, 0), Some(mon_am));
    }

    #[test]
    fn test_utilization_zero_capacity_is_zero() {
        let cell = CapacityCell::new(0);
        assert_eq!(cell.utilization_pct(), 0.0);

        let mut cell = CapacityCell::new(200);
        cell.remaining_jars = 50;
        assert_eq!(cell.used_jars(), 150);
        assert!((cell.utilization_pct() - 75.0).abs() < 1e-9);
    }
}
