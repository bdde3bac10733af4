// ==========================================
// 组培转接周排程系统 - 核心库
// ==========================================
// 职责: 把适龄的组培批次排入下周 5 天 × 2 时段的转接工位
// 流程: 导入 → 适龄判定 → 工位池分配 → 品系分组 → 贪心填充 → 统计 → 报表
// 系统定位: 决策支持 (排程结果供人工确认)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 排程参数
pub mod config;

// 引擎层 - 排程规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 报表层 - 扁平表格输出
pub mod report;

// API 层 - 对外接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{HalfDay, Medium, Pool, Slot, WorkDay};

// 领域实体
pub use domain::{
    BacklogItem, BacklogReason, BatchRecord, CapacityGrid, ClassifiedRecord, IneligibilityReason,
    PlannedItem, ScheduleResult, ScheduleStatistics,
};

// 配置
pub use config::{ConfigError, PlannerConfig};

// 引擎
pub use engine::{EligibilityClassifier, ScheduleOrchestrator};

// 导入
pub use importer::{BatchImporter, ImportError, ImportReport};

// API
pub use api::{ApiError, PlanningApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "组培转接周排程系统";
