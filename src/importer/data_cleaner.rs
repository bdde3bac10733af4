// ==========================================
// 组培转接周排程系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化
// 约定: 品系与培养基代码保持原样 (判定时培养基忽略大小写, 分组时品系精确匹配)
// ==========================================

use crate::domain::batch::RawBatchRow;
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }
}

impl DataCleaner {
    /// 清洗整行文本字段
    pub fn clean_row(&self, mut row: RawBatchRow) -> RawBatchRow {
        row.barcode = self.normalize_null(row.barcode);
        row.strain_code = self.normalize_null(row.strain_code);
        row.medium_code = self.normalize_null(row.medium_code);
        row.location = self.normalize_null(row.location);
        row
    }
}
