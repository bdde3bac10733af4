// ==========================================
// 组培转接周排程系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、产能约束接口
// 红线: 不含导入逻辑, 不含引擎逻辑
// ==========================================

pub mod batch;
pub mod capacity;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use batch::{BatchRecord, ClassifiedRecord, IneligibilityReason, RawBatchRow};
pub use capacity::{CapacityCell, CapacityConstraint, CapacityGrid};
pub use schedule::{
    BacklogItem, BacklogReason, CellUtilization, IneligibleItem, PlannedItem, PoolStatistics,
    ScheduleGrid, ScheduleResult, ScheduleStatistics,
};
pub use types::{HalfDay, Medium, Pool, Slot, WorkDay, CELLS_PER_POOL, POOL_COUNT};
