// ==========================================
// 组培转接周排程系统 - 批次导入器
// ==========================================
// 职责: 整合导入流程, 从文件 / 原始行到规范化批次快照
// 流程: 解析 → 映射 → 清洗 → 派生 → 规范化
// 红线: 行级错误只拒收该行, 不中止整批导入
// ==========================================

use crate::config::PlannerConfig;
use crate::domain::batch::{BatchRecord, RawBatchRow};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::derivation::DerivationService;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{
    DerivationService as DerivationServiceTrait, FieldMapper as FieldMapperTrait, FileParser,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// ==========================================
// ImportSettings - 导入参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSettings {
    pub jars_per_box: u32,
    pub reference_date: NaiveDate, // 周龄换算参考日
}

impl ImportSettings {
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            jars_per_box: config.jars_per_box,
            reference_date: config.resolved_reference_date(),
        }
    }
}

// ==========================================
// ImportReport - 导入报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row_number: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported_rows: usize,
    pub rejected: Vec<RejectedRow>,
    pub jars_from_boxes: usize,     // 瓶数由箱数换算
    pub age_derived: usize,         // 周龄由日期换算
    pub age_unknown: usize,         // 周龄无法确定
    pub duplicate_barcodes: Vec<String>,
}

impl ImportReport {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub records: Vec<BatchRecord>,
    pub report: ImportReport,
}

// ==========================================
// BatchImporter - 批次导入器
// ==========================================
pub struct BatchImporter {
    settings: ImportSettings,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapperTrait>,
    data_cleaner: DataCleaner,
    derivation_service: Box<dyn DerivationServiceTrait>,
}

impl BatchImporter {
    /// 使用默认组件创建导入器
    pub fn new(settings: ImportSettings) -> Self {
        Self::with_components(
            settings,
            Box::new(UniversalFileParser),
            Box::new(FieldMapper),
            Box::new(DerivationService),
        )
    }

    /// 注入自定义组件 (测试 / 扩展列名)
    pub fn with_components(
        settings: ImportSettings,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapperTrait>,
        derivation_service: Box<dyn DerivationServiceTrait>,
    ) -> Self {
        Self {
            settings,
            file_parser,
            field_mapper,
            data_cleaner: DataCleaner,
            derivation_service,
        }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 从文件导入批次
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 规范化批次 + 导入报告
    /// - Err: 文件级错误 (不存在 / 格式不支持 / 解析失败)
    #[instrument(skip(self, file_path), fields(path = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportOutcome> {
        info!("开始导入批次数据");

        // === 步骤 1: 解析文件 ===
        let raw_rows = self.file_parser.parse_to_raw_records(file_path.as_ref())?;
        info!(total_rows = raw_rows.len(), "文件解析完成");

        Ok(self.import_rows(&raw_rows))
    }

    /// 从已解析的原始行导入批次
    pub fn import_rows(&self, raw_rows: &[HashMap<String, String>]) -> ImportOutcome {
        let mut report = ImportReport {
            total_rows: raw_rows.len(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(raw_rows.len());
        let mut seen_barcodes = HashSet::new();

        for (idx, row) in raw_rows.iter().enumerate() {
            let row_number = idx + 1;
            match self.import_row(row, row_number, &mut report) {
                Ok(record) => {
                    if !seen_barcodes.insert(record.barcode.clone()) {
                        warn!(row = row_number, barcode = %record.barcode, "条码重复");
                        report.duplicate_barcodes.push(record.barcode.clone());
                    }
                    records.push(record);
                }
                Err(e) => {
                    warn!(row = row_number, error = %e, "行被拒收");
                    report.rejected.push(RejectedRow {
                        row_number,
                        message: e.to_string(),
                    });
                }
            }
        }

        report.imported_rows = records.len();
        info!(
            total_rows = report.total_rows,
            imported_rows = report.imported_rows,
            rejected_rows = report.rejected_count(),
            age_unknown = report.age_unknown,
            "批次导入完成"
        );

        ImportOutcome { records, report }
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn import_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
        report: &mut ImportReport,
    ) -> ImportResult<BatchRecord> {
        // === 步骤 2: 字段映射 ===
        let raw = self.field_mapper.map_to_raw_batch(row, row_number)?;

        // === 步骤 3: 清洗 ===
        let raw = self.data_cleaner.clean_row(raw);

        // === 步骤 4: 派生 + 规范化 ===
        self.normalize(raw, report)
    }

    fn normalize(&self, raw: RawBatchRow, report: &mut ImportReport) -> ImportResult<BatchRecord> {
        let barcode = raw
            .barcode
            .ok_or(ImportError::BarcodeMissing(raw.row_number))?;

        if raw.total_jars.is_none() && (raw.nb_boxes.is_some() || raw.leftover_jars.is_some()) {
            report.jars_from_boxes += 1;
        }
        let jars = self.derivation_service.derive_jars(
            raw.total_jars,
            raw.nb_boxes,
            raw.leftover_jars,
            self.settings.jars_per_box,
        );

        let age_weeks = self.derivation_service.derive_age_weeks(
            raw.age_weeks,
            raw.plant_date,
            &barcode,
            self.settings.reference_date,
        );
        match (raw.age_weeks, age_weeks) {
            (None, Some(_)) => report.age_derived += 1,
            (_, None) => report.age_unknown += 1,
            _ => {}
        }

        debug!(
            row = raw.row_number,
            barcode = %barcode,
            jars,
            age_weeks = ?age_weeks,
            "行已规范化"
        );

        Ok(BatchRecord {
            barcode,
            strain_code: raw.strain_code.unwrap_or_default(),
            medium_code: raw.medium_code.unwrap_or_default(),
            location: raw.location.unwrap_or_default(),
            jars,
            age_weeks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ImportSettings {
        ImportSettings {
            jars_per_box: 14,
            reference_date: NaiveDate::from_ymd_opt(2025, 11, 7).unwrap(),
        }
    }

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_import_rows_normalizes_and_derives() {
        let importer = BatchImporter::new(settings());
        let outcome = importer.import_rows(&[
            row(&[
                ("barcode", "735820250912AW2"),
                ("strain", "BRAHY"),
                ("medium", "xm"),
                ("location", "CH1"),
                ("nb_boxes", "2"),
                ("nb_jars_per_box", "3"),
            ]),
            row(&[
                ("barcode", "B2"),
                ("strain", "MUSA"),
                ("medium", "X"),
                ("jars", "20"),
                ("nb_weeks", "11"),
            ]),
        ]);

        assert_eq!(outcome.records.len(), 2);
        let first = &outcome.records[0];
        assert_eq!(first.jars, 31);
        assert_eq!(first.age_weeks, Some(8));
        assert_eq!(first.medium_code, "xm");

        let second = &outcome.records[1];
        assert_eq!(second.jars, 20);
        assert_eq!(second.age_weeks, Some(11));
        assert_eq!(second.location, "");

        assert_eq!(outcome.report.jars_from_boxes, 1);
        assert_eq!(outcome.report.age_derived, 1);
        assert_eq!(outcome.report.age_unknown, 0);
    }

    #[test]
    fn test_row_errors_are_rejected_not_fatal() {
        let importer = BatchImporter::new(settings());
        let outcome = importer.import_rows(&[
            row(&[("strain", "MUSA"), ("jars", "5")]),
            row(&[("barcode", "B2"), ("jars", "many")]),
            row(&[("barcode", "B3"), ("jars", "5")]),
        ]);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].barcode, "B3");
        assert_eq!(outcome.records[0].age_weeks, None);
        assert_eq!(outcome.report.total_rows, 3);
        assert_eq!(outcome.report.imported_rows, 1);
        assert_eq!(outcome.report.rejected_count(), 2);
        assert_eq!(outcome.report.rejected[0].row_number, 1);
        assert_eq!(outcome.report.rejected[1].row_number, 2);
        assert_eq!(outcome.report.age_unknown, 1);
    }

    #[test]
    fn test_duplicate_barcodes_reported() {
        let importer = BatchImporter::new(settings());
        let outcome = importer.import_rows(&[
            row(&[("barcode", "B1"), ("jars", "5")]),
            row(&[("barcode", "B1"), ("jars", "6")]),
        ]);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.report.duplicate_barcodes, vec!["B1".to_string()]);
    }

    #[test]
    fn test_import_file_missing() {
        let importer = BatchImporter::new(settings());
        let result = importer.import_file("does_not_exist.csv");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
