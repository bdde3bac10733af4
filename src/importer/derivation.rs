// ==========================================
// 组培转接周排程系统 - 派生字段服务
// ==========================================
// 职责: 补齐瓶数与周龄
// 规则:
//   瓶数 = total_jars ?? (nb_boxes × jars_per_box + leftover_jars)
//   周龄 = age_weeks ?? (参考日 - 接种日).天数 / 7 ?? 条码内嵌 YYYYMMDD 换算
// ==========================================

use crate::importer::importer_trait::DerivationService as DerivationServiceTrait;
use chrono::{Datelike, NaiveDate};

// 条码内嵌日期的合理年份区间
const BARCODE_YEAR_MIN: i32 = 1990;
const BARCODE_YEAR_MAX: i32 = 2100;
const BARCODE_DATE_LEN: usize = 8;

pub struct DerivationService;

impl DerivationServiceTrait for DerivationService {
    fn derive_jars(
        &self,
        total_jars: Option<u32>,
        nb_boxes: Option<u32>,
        leftover_jars: Option<u32>,
        jars_per_box: u32,
    ) -> u32 {
        match total_jars {
            Some(total) => total,
            None => nb_boxes
                .unwrap_or(0)
                .saturating_mul(jars_per_box)
                .saturating_add(leftover_jars.unwrap_or(0)),
        }
    }

    fn derive_age_weeks(
        &self,
        age_weeks: Option<i32>,
        plant_date: Option<NaiveDate>,
        barcode: &str,
        reference_date: NaiveDate,
    ) -> Option<i32> {
        age_weeks
            .or_else(|| plant_date.map(|d| weeks_between(d, reference_date)))
            .or_else(|| {
                extract_barcode_date(barcode).map(|d| weeks_between(d, reference_date))
            })
    }
}

/// 整周数, 向零取整
fn weeks_between(from: NaiveDate, to: NaiveDate) -> i32 {
    ((to - from).num_days() / 7) as i32
}

/// 从条码中提取首个合法的 8 位 YYYYMMDD 日期
///
/// 例: `735820250912AW2` → 2025-09-12
pub fn extract_barcode_date(barcode: &str) -> Option<NaiveDate> {
    let bytes = barcode.as_bytes();
    if bytes.len() < BARCODE_DATE_LEN {
        return None;
    }

    bytes
        .windows(BARCODE_DATE_LEN)
        .filter(|w| w.iter().all(u8::is_ascii_digit))
        .filter_map(|w| std::str::from_utf8(w).ok())
        .filter_map(|s| NaiveDate::parse_from_str(s, "%Y%m%d").ok())
        .find(|d| (BARCODE_YEAR_MIN..=BARCODE_YEAR_MAX).contains(&d.year()))
}
