// ==========================================
// 组培转接周排程系统 - 报表模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("报表输出目录不可用: {path}: {message}")]
    OutputDirError { path: String, message: String },

    #[error("报表写入失败: {0}")]
    WriteError(String),

    #[error("CSV 序列化失败: {0}")]
    CsvError(#[from] csv::Error),
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::WriteError(err.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
