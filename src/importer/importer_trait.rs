// ==========================================
// 组培转接周排程系统 - 导入接口定义
// ==========================================
// 流程: 文件解析 → 字段映射 → 数据清洗 → 派生 → 规范化批次
// 约束: 导入边界之后核心引擎只接触 BatchRecord
// ==========================================

use crate::domain::batch::RawBatchRow;
use crate::importer::error::ImportResult;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser - 文件解析
// ==========================================
pub trait FileParser {
    /// 解析文件为 表头 → 单元格文本 的行列表
    ///
    /// 完全空白的行会被跳过
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// FieldMapper - 字段映射
// ==========================================
pub trait FieldMapper {
    /// 源列名 (含别名) → RawBatchRow, 同时完成类型转换
    ///
    /// # 参数
    /// - row: 原始行
    /// - row_number: 行号 (从 1 开始, 不含表头)
    fn map_to_raw_batch(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawBatchRow>;
}

// ==========================================
// DataCleaner - 数据清洗
// ==========================================
pub trait DataCleaner {
    /// TRIM, 空白字符串归一为 None
    fn normalize_null(&self, value: Option<String>) -> Option<String>;
}

// ==========================================
// DerivationService - 派生字段
// ==========================================
pub trait DerivationService {
    /// 瓶数 = 总瓶数, 缺失时 箱数 × 每箱瓶数 + 零头
    fn derive_jars(
        &self,
        total_jars: Option<u32>,
        nb_boxes: Option<u32>,
        leftover_jars: Option<u32>,
        jars_per_box: u32,
    ) -> u32;

    /// 周龄 = 显式周龄 > 接种日期换算 > 条码内嵌日期换算 > None
    fn derive_age_weeks(
        &self,
        age_weeks: Option<i32>,
        plant_date: Option<NaiveDate>,
        barcode: &str,
        reference_date: NaiveDate,
    ) -> Option<i32>;
}
