// ==========================================
// 组培转接周排程系统 - API层错误类型
// ==========================================
// 职责: 汇总配置 / 导入 / 报表三层错误, 提供统一的用户可读消息
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use crate::report::ReportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("报表输出失败: {0}")]
    Report(#[from] ReportError),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
