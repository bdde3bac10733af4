// ==========================================
// 组培转接周排程系统 - 报表层
// ==========================================
// 职责: 排程结果 → 扁平表格文本
// 红线: 只读排程结果, 不参与排程决策
// ==========================================

pub mod csv_report;
pub mod error;

pub use csv_report::{
    write_backlog_csv, write_planned_csv, write_reports, write_utilization_csv, ReportPaths,
    BACKLOG_HEADERS, PLANNED_HEADERS, UTILIZATION_HEADERS,
};
pub use error::{ReportError, ReportResult};
