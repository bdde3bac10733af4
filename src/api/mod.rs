// ==========================================
// 组培转接周排程系统 - API 层
// ==========================================
// 职责: 提供排程对外接口, 供命令行与调用方使用
// ==========================================

pub mod error;
pub mod planning_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use planning_api::{PlanOutcome, PlanSummary, PlanningApi};
