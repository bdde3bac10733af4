// ==========================================
// 组培转接周排程系统 - 导入层
// ==========================================
// 职责: 外部批次数据 → 规范化 BatchRecord
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod batch_importer;
pub mod data_cleaner;
pub mod derivation;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use batch_importer::{BatchImporter, ImportOutcome, ImportReport, ImportSettings, RejectedRow};
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use derivation::{extract_barcode_date, DerivationService as DerivationServiceImpl};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, DerivationService, FieldMapper, FileParser};
