// ==========================================
// 组培转接周排程系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 (含别名) → RawBatchRow + 类型转换
// 说明: 列名比较忽略 ASCII 大小写; 空单元格视为缺失
// ==========================================

use crate::domain::batch::RawBatchRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

/// 标准字段名
pub mod fields {
    pub const BARCODE: &str = "barcode";
    pub const STRAIN_CODE: &str = "strain_code";
    pub const MEDIUM_CODE: &str = "medium_code";
    pub const LOCATION: &str = "location";
    pub const TOTAL_JARS: &str = "total_jars";
    pub const NB_BOXES: &str = "nb_boxes";
    pub const LEFTOVER_JARS: &str = "leftover_jars";
    pub const AGE_WEEKS: &str = "age_weeks";
    pub const PLANT_DATE: &str = "plant_date";
}

// Excel 序列日期基准 (1899-12-30 = 0)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_batch(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawBatchRow> {
        Ok(RawBatchRow {
            // 主键
            barcode: self.get_string(row, fields::BARCODE),

            // 分类信息
            strain_code: self.get_string(row, fields::STRAIN_CODE),
            medium_code: self.get_string(row, fields::MEDIUM_CODE),
            location: self.get_string(row, fields::LOCATION),

            // 瓶数
            total_jars: self.parse_u32(row, fields::TOTAL_JARS, row_number)?,
            nb_boxes: self.parse_u32(row, fields::NB_BOXES, row_number)?,
            leftover_jars: self.parse_u32(row, fields::LEFTOVER_JARS, row_number)?,

            // 周龄
            age_weeks: self.parse_i32(row, fields::AGE_WEEKS, row_number)?,
            plant_date: self.parse_date(row, fields::PLANT_DATE, row_number)?,

            row_number,
        })
    }
}

impl FieldMapper {
    /// 标准字段 → 可接受的源列名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            fields::BARCODE => &["barcode", "code_barre", "raw_scan"],
            fields::STRAIN_CODE => &["strain_code", "strain", "souche"],
            fields::MEDIUM_CODE => &["medium_code", "milieu", "medium"],
            fields::LOCATION => &["location", "chambre", "chamber"],
            fields::TOTAL_JARS => &["total_jars", "bocaux", "jars"],
            fields::NB_BOXES => &["nb_boxes", "nb_caisse"],
            fields::LEFTOVER_JARS => &["nb_jars_per_box", "nb_bocaux"],
            fields::AGE_WEEKS => &["nb_weeks", "nb_sem", "age_weeks"],
            fields::PLANT_DATE => &["date_plant", "plant_date", "date"],
            _ => &[],
        }
    }

    /// 提取字符串字段, 按别名顺序取第一个非空值
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        for alias in Self::aliases(key) {
            let hit = row
                .get(*alias)
                .or_else(|| {
                    row.iter()
                        .find(|(header, _)| header.eq_ignore_ascii_case(alias))
                        .map(|(_, v)| v)
                })
                .map(|v| v.trim())
                .filter(|v| !v.is_empty());
            if let Some(value) = hit {
                return Some(value.to_string());
            }
        }
        None
    }

    /// 解析整数; 接受 "14" 与 Excel 导出的 "14.0"
    fn parse_integer(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<i64>> {
        let Some(value) = self.get_string(row, key) else {
            return Ok(None);
        };

        if let Ok(n) = value.parse::<i64>() {
            return Ok(Some(n));
        }
        match value.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(Some(f as i64)),
            _ => Err(ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为整数: {}", value),
            }),
        }
    }

    fn parse_u32(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<u32>> {
        self.parse_integer(row, key, row_number)?
            .map(|n| {
                u32::try_from(n).map_err(|_| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("超出非负整数范围: {}", n),
                })
            })
            .transpose()
    }

    fn parse_i32(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<i32>> {
        self.parse_integer(row, key, row_number)?
            .map(|n| {
                i32::try_from(n).map_err(|_| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("超出整数范围: {}", n),
                })
            })
            .transpose()
    }

    /// 解析日期
    ///
    /// 支持: YYYY-MM-DD / YYYYMMDD / DD/MM/YYYY / YYYY/MM/DD,
    /// 带时间部分的日期时间, 以及 Excel 序列日期
    fn parse_date(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        let Some(value) = self.get_string(row, key) else {
            return Ok(None);
        };

        parse_date_text(&value)
            .map(Some)
            .ok_or_else(|| ImportError::DateFormatError {
                row: row_number,
                field: key.to_string(),
                value,
            })
    }
}

fn parse_date_text(value: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y%m%d", "%d/%m/%Y", "%Y/%m/%d"];

    // 去掉时间部分: "2025-09-12 00:00:00" / "2025-09-12T00:00:00"
    let date_part = value
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(value);

    if let Some(date) = FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
    {
        return Some(date);
    }

    // Excel 序列日期
    let serial = value.parse::<f64>().ok()?;
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_signed(Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_canonical_columns() {
        let mapper = FieldMapper;
        let raw = mapper
            .map_to_raw_batch(
                &row(&[
                    ("barcode", "B001"),
                    ("strain_code", "MUSA"),
                    ("medium_code", "x"),
                    ("location", "CH1"),
                    ("total_jars", "42"),
                    ("age_weeks", "9"),
                ]),
                1,
            )
            .unwrap();

        assert_eq!(raw.barcode.as_deref(), Some("B001"));
        assert_eq!(raw.strain_code.as_deref(), Some("MUSA"));
        assert_eq!(raw.medium_code.as_deref(), Some("x"));
        assert_eq!(raw.total_jars, Some(42));
        assert_eq!(raw.age_weeks, Some(9));
        assert_eq!(raw.row_number, 1);
    }

    #[test]
    fn test_map_alias_columns() {
        let mapper = FieldMapper;
        let raw = mapper
            .map_to_raw_batch(
                &row(&[
                    ("Code_Barre", "735820250912AW2"),
                    ("souche", "BRAHY"),
                    ("milieu", "E+"),
                    ("chambre", "CHF2"),
                    ("nb_caisse", "3"),
                    ("nb_bocaux", "5"),
                    ("nb_sem", ""),
                    ("date_plant", "12/09/2025"),
                ]),
                7,
            )
            .unwrap();

        assert_eq!(raw.barcode.as_deref(), Some("735820250912AW2"));
        assert_eq!(raw.location.as_deref(), Some("CHF2"));
        assert_eq!(raw.total_jars, None);
        assert_eq!(raw.nb_boxes, Some(3));
        assert_eq!(raw.leftover_jars, Some(5));
        assert_eq!(raw.age_weeks, None);
        assert_eq!(raw.plant_date, NaiveDate::from_ymd_opt(2025, 9, 12));
    }

    #[test]
    fn test_float_integers_accepted() {
        let mapper = FieldMapper;
        let raw = mapper
            .map_to_raw_batch(&row(&[("barcode", "B1"), ("jars", "14.0")]), 1)
            .unwrap();
        assert_eq!(raw.total_jars, Some(14));
    }

    #[test]
    fn test_type_conversion_error_carries_row() {
        let mapper = FieldMapper;
        let err = mapper
            .map_to_raw_batch(&row(&[("barcode", "B1"), ("jars", "lots")]), 5)
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::TypeConversionError { row: 5, ref field, .. } if field == "total_jars"
        ));
    }

    #[test]
    fn test_negative_jar_count_rejected() {
        let mapper = FieldMapper;
        let result = mapper.map_to_raw_batch(&row(&[("barcode", "B1"), ("jars", "-3")]), 2);
        assert!(result.is_err());
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 9, 12);
        assert_eq!(parse_date_text("2025-09-12"), expected);
        assert_eq!(parse_date_text("20250912"), expected);
        assert_eq!(parse_date_text("12/09/2025"), expected);
        assert_eq!(parse_date_text("2025-09-12 00:00:00"), expected);
        assert_eq!(parse_date_text("45912"), expected);
        assert_eq!(parse_date_text("not a date"), None);
    }

    #[test]
    fn test_bad_date_is_row_error() {
        let mapper = FieldMapper;
        let err = mapper
            .map_to_raw_batch(&row(&[("barcode", "B1"), ("date", "yesterday")]), 3)
            .unwrap_err();
        assert!(err.is_row_level());
    }
}
