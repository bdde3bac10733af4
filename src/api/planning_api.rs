// ==========================================
// 组培转接周排程系统 - 排程 API
// ==========================================
// 职责: 导入 → 排程 → 报表 的对外入口
// 说明: 每次调用新建编排器与产能网格, 调用之间不共享状态
// ==========================================

use crate::api::error::ApiResult;
use crate::config::PlannerConfig;
use crate::domain::batch::BatchRecord;
use crate::domain::schedule::{ScheduleResult, ScheduleStatistics};
use crate::engine::ScheduleOrchestrator;
use crate::importer::{BatchImporter, ImportReport, ImportSettings};
use crate::report::{write_reports, ReportPaths};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

// ==========================================
// PlanOutcome - 文件排程结果
// ==========================================
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub import_report: ImportReport,
    pub result: ScheduleResult,
}

// ==========================================
// PlanSummary - 排程摘要 (供命令行 / 日志输出)
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary<'a> {
    pub week_start: chrono::NaiveDate,
    pub imported_rows: usize,
    pub rejected_rows: usize,
    pub statistics: &'a ScheduleStatistics,
}

impl PlanOutcome {
    pub fn summary(&self) -> PlanSummary<'_> {
        PlanSummary {
            week_start: self.result.week_start,
            imported_rows: self.import_report.imported_rows,
            rejected_rows: self.import_report.rejected_count(),
            statistics: &self.result.statistics,
        }
    }
}

// ==========================================
// PlanningApi - 排程 API
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanningApi;

impl PlanningApi {
    pub fn new() -> Self {
        Self
    }

    /// 对已规范化的批次快照执行周排程
    ///
    /// # 参数
    /// - records: 批次快照 (只读)
    /// - config: 排程配置 (执行前校验)
    ///
    /// # 返回
    /// - Ok(ScheduleResult)
    /// - Err(ApiError::Config): 配置非法, 排程未开始
    #[instrument(skip(self, records, config), fields(records_count = records.len()))]
    pub fn plan_records(
        &self,
        records: &[BatchRecord],
        config: &PlannerConfig,
    ) -> ApiResult<ScheduleResult> {
        let orchestrator = ScheduleOrchestrator::new(config.clone())?;
        Ok(orchestrator.execute(records))
    }

    /// 从 CSV / Excel 文件导入并执行周排程
    ///
    /// 配置先于导入校验; 行级导入错误记入导入报告, 不中止排程
    #[instrument(skip(self, file_path, config), fields(path = %file_path.as_ref().display()))]
    pub fn plan_from_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        config: &PlannerConfig,
    ) -> ApiResult<PlanOutcome> {
        let orchestrator = ScheduleOrchestrator::new(config.clone())?;

        let importer = BatchImporter::new(ImportSettings::from_config(config));
        let imported = importer.import_file(file_path)?;

        let result = orchestrator.execute(&imported.records);
        info!(
            imported_rows = imported.report.imported_rows,
            rejected_rows = imported.report.rejected_count(),
            planned = result.planned.len(),
            backlog = result.backlog.len(),
            "文件排程完成"
        );

        Ok(PlanOutcome {
            import_report: imported.report,
            result,
        })
    }

    /// 写出已排 / 积压 / 利用率三张 CSV
    pub fn export_reports<P: AsRef<Path>>(
        &self,
        result: &ScheduleResult,
        dir: P,
        prefix: &str,
    ) -> ApiResult<ReportPaths> {
        Ok(write_reports(dir, prefix, result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use chrono::NaiveDate;

    fn config() -> PlannerConfig {
        PlannerConfig {
            week_start: NaiveDate::from_ymd_opt(2025, 9, 15),
            reference_date: NaiveDate::from_ymd_opt(2025, 9, 15),
            ..PlannerConfig::default()
        }
    }

    #[test]
    fn test_plan_records_rejects_invalid_config() {
        let bad = PlannerConfig {
            general_workers: 0,
            ..config()
        };
        let result = PlanningApi::new().plan_records(&[], &bad);
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_plan_records_empty_input() {
        let result = PlanningApi::new().plan_records(&[], &config()).unwrap();
        assert!(result.planned.is_empty());
        assert!(result.backlog.is_empty());
        assert_eq!(result.statistics.planning_rate_pct, 0.0);
    }

    #[test]
    fn test_plan_from_missing_file() {
        let result = PlanningApi::new().plan_from_file("missing.csv", &config());
        assert!(matches!(result, Err(ApiError::Import(_))));
    }
}
