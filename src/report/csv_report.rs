// ==========================================
// 组培转接周排程系统 - CSV 报表输出
// ==========================================
// 输出:
//   已排:   day, slot, pool, barcode, strain, medium, jars, age_weeks, location
//   积压:   barcode, strain, medium, jars, age_weeks, reason
//   利用率: pool, day, slot, date, capacity, used, remaining, utilization_pct
// 约定: 表头始终写出 (即使无数据行); 未知周龄为空单元格
// ==========================================

use crate::domain::schedule::{BacklogItem, PlannedItem, ScheduleResult};
use crate::report::error::{ReportError, ReportResult};
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const PLANNED_HEADERS: [&str; 9] = [
    "day", "slot", "pool", "barcode", "strain", "medium", "jars", "age_weeks", "location",
];
pub const BACKLOG_HEADERS: [&str; 6] =
    ["barcode", "strain", "medium", "jars", "age_weeks", "reason"];
pub const UTILIZATION_HEADERS: [&str; 8] = [
    "pool",
    "day",
    "slot",
    "date",
    "capacity",
    "used",
    "remaining",
    "utilization_pct",
];

#[derive(Serialize)]
struct PlannedRow<'a> {
    day: &'static str,
    slot: &'static str,
    pool: &'static str,
    barcode: &'a str,
    strain: &'a str,
    medium: &'a str,
    jars: u32,
    age_weeks: Option<i32>,
    location: &'a str,
}

impl<'a> From<&'a PlannedItem> for PlannedRow<'a> {
    fn from(item: &'a PlannedItem) -> Self {
        Self {
            day: item.day().as_str(),
            slot: item.half().as_str(),
            pool: item.pool.as_str(),
            barcode: &item.record.barcode,
            strain: &item.record.strain_code,
            medium: &item.record.medium_code,
            jars: item.record.jars,
            age_weeks: item.record.age_weeks,
            location: &item.record.location,
        }
    }
}

#[derive(Serialize)]
struct BacklogRow<'a> {
    barcode: &'a str,
    strain: &'a str,
    medium: &'a str,
    jars: u32,
    age_weeks: Option<i32>,
    reason: String,
}

impl<'a> From<&'a BacklogItem> for BacklogRow<'a> {
    fn from(item: &'a BacklogItem) -> Self {
        Self {
            barcode: &item.record.barcode,
            strain: &item.record.strain_code,
            medium: &item.record.medium_code,
            jars: item.record.jars,
            age_weeks: item.record.age_weeks,
            reason: item.reason.to_string(),
        }
    }
}

#[derive(Serialize)]
struct UtilizationRow {
    pool: &'static str,
    day: &'static str,
    slot: &'static str,
    date: NaiveDate,
    capacity: u32,
    used: u32,
    remaining: u32,
    utilization_pct: String,
}

/// 写出 CSV: 先写表头, 再逐行序列化
fn write_rows<W, R, I>(writer: W, headers: &[&str], rows: I) -> ReportResult<()>
where
    W: Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// ==========================================
// 单表写出
// ==========================================

pub fn write_planned_csv<W: Write>(writer: W, planned: &[PlannedItem]) -> ReportResult<()> {
    write_rows(writer, &PLANNED_HEADERS, planned.iter().map(PlannedRow::from))
}

pub fn write_backlog_csv<W: Write>(writer: W, backlog: &[BacklogItem]) -> ReportResult<()> {
    write_rows(writer, &BACKLOG_HEADERS, backlog.iter().map(BacklogRow::from))
}

pub fn write_utilization_csv<W: Write>(writer: W, result: &ScheduleResult) -> ReportResult<()> {
    let rows = result
        .statistics
        .pools
        .iter()
        .flat_map(|pool_stats| pool_stats.cells.iter())
        .map(|cell| UtilizationRow {
            pool: cell.pool.as_str(),
            day: cell.slot.day.as_str(),
            slot: cell.slot.half.as_str(),
            date: cell.date,
            capacity: cell.initial_jars,
            used: cell.used_jars,
            remaining: cell.remaining_jars,
            utilization_pct: format!("{:.2}", cell.utilization_pct),
        });
    write_rows(writer, &UTILIZATION_HEADERS, rows)
}

// ==========================================
// ReportPaths - 目录级写出
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub planned: PathBuf,
    pub backlog: PathBuf,
    pub utilization: PathBuf,
}

impl ReportPaths {
    pub fn new(dir: &Path, prefix: &str) -> Self {
        Self {
            planned: dir.join(format!("{}_planned.csv", prefix)),
            backlog: dir.join(format!("{}_backlog.csv", prefix)),
            utilization: dir.join(format!("{}_utilization.csv", prefix)),
        }
    }
}

/// 将三张报表写入目录 (目录不存在时创建)
///
/// # 返回
/// 写出的文件路径
pub fn write_reports<P: AsRef<Path>>(
    dir: P,
    prefix: &str,
    result: &ScheduleResult,
) -> ReportResult<ReportPaths> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| ReportError::OutputDirError {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let paths = ReportPaths::new(dir, prefix);
    write_planned_csv(File::create(&paths.planned)?, &result.planned)?;
    write_backlog_csv(File::create(&paths.backlog)?, &result.backlog)?;
    write_utilization_csv(File::create(&paths.utilization)?, result)?;

    info!(
        dir = %dir.display(),
        planned_rows = result.planned.len(),
        backlog_rows = result.backlog.len(),
        "报表已写出"
    );
    Ok(paths)
}
