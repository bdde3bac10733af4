// ==========================================
// 组培转接周排程系统 - 引擎层
// ==========================================
// 职责: 实现排程规则引擎
// 红线: 引擎不做 I/O, 所有不可排 / 积压必须输出 reason
// ==========================================

pub mod eligibility;
pub mod eligibility_core;
pub mod orchestrator;
pub mod pool_assigner;
pub mod scheduler;
pub mod statistics;
pub mod strain_grouper;

// 重导出核心引擎
pub use eligibility::EligibilityClassifier;
pub use eligibility_core::EligibilityCore;
pub use orchestrator::ScheduleOrchestrator;
pub use pool_assigner::PoolAssigner;
pub use scheduler::{GreedyScheduler, PoolPlacement};
pub use statistics::StatisticsAggregator;
pub use strain_grouper::{StrainGroup, StrainGrouper};
