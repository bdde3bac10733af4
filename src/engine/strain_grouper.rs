// ==========================================
// 组培转接周排程系统 - 品系分组排序引擎
// ==========================================
// 职责: 单个工位池内按品系聚类 + 组间/组内优先级排序
// 排序键:
//   组间: 平均周龄降序 (老组优先)
//   组内: 周龄降序
//   并列: 保持输入顺序 (组的位置 = 该品系首次出现的位置)
// ==========================================

use crate::domain::batch::BatchRecord;
use serde::Serialize;
use std::collections::HashMap;

// ==========================================
// StrainGroup - 品系组 (单次排程内临时存在)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrainGroup {
    pub strain_code: String,
    pub records: Vec<BatchRecord>, // 周龄降序
    pub mean_age_weeks: f64,
    pub total_jars: u64,
}

impl StrainGroup {
    fn new(strain_code: String) -> Self {
        Self {
            strain_code,
            records: Vec::new(),
            mean_age_weeks: 0.0,
            total_jars: 0,
        }
    }

    /// 计算组内汇总并排序
    fn finalize(&mut self) {
        // 稳定排序: 同周龄保持输入顺序; 未知周龄排在最后
        self.records.sort_by(|a, b| b.age_weeks.cmp(&a.age_weeks));

        let known: Vec<i64> = self
            .records
            .iter()
            .filter_map(|r| r.age_weeks.map(i64::from))
            .collect();
        self.mean_age_weeks = if known.is_empty() {
            0.0
        } else {
            known.iter().sum::<i64>() as f64 / known.len() as f64
        };
        self.total_jars = self.records.iter().map(|r| r.jars as u64).sum();
    }
}

// ==========================================
// StrainGrouper - 分组排序引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct StrainGrouper;

impl StrainGrouper {
    pub fn new() -> Self {
        Self
    }

    /// 按品系分组并给出处理顺序
    ///
    /// # 参数
    /// - `records`: 同一工位池内已判定可排的批次 (输入顺序即快照顺序)
    ///
    /// # 返回
    /// 按优先级从高到低排列的品系组
    pub fn group(&self, records: Vec<BatchRecord>) -> Vec<StrainGroup> {
        let mut groups: Vec<StrainGroup> = Vec::new();
        let mut index_by_strain: HashMap<String, usize> = HashMap::new();

        // 品系代码精确匹配; 组按首次出现顺序建立
        for record in records {
            let idx = *index_by_strain
                .entry(record.strain_code.clone())
                .or_insert_with(|| {
                    groups.push(StrainGroup::new(record.strain_code.clone()));
                    groups.len() - 1
                });
            groups[idx].records.push(record);
        }

        for group in groups.iter_mut() {
            group.finalize();
        }

        // 稳定排序: 平均周龄相同的组保持首次出现顺序
        groups.sort_by(|a, b| b.mean_age_weeks.total_cmp(&a.mean_age_weeks));
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(barcode: &str, strain: &str, jars: u32, age: i32) -> BatchRecord {
        BatchRecord::new(barcode, strain, "X", "C1", jars, Some(age))
    }

    #[test]
    fn test_groups_ordered_by_mean_age_desc() {
        let grouper = StrainGrouper::new();
        let groups = grouper.group(vec![
            rec("B1", "MUSA", 10, 5),
            rec("A1", "BRAHY", 10, 12),
            rec("B2", "MUSA", 20, 7),
            rec("A2", "BRAHY", 5, 8),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].strain_code, "BRAHY");
        assert!((groups[0].mean_age_weeks - 10.0).abs() < 1e-9);
        assert_eq!(groups[0].total_jars, 15);
        assert_eq!(groups[1].strain_code, "MUSA");
        assert!((groups[1].mean_age_weeks - 6.0).abs() < 1e-9);
        assert_eq!(groups[1].total_jars, 30);
    }

    #[test]
    fn test_records_within_group_oldest_first_stable() {
        let grouper = StrainGrouper::new();
        let groups = grouper.group(vec![
            rec("M1", "MUSA", 10, 9),
            rec("M2", "MUSA", 10, 12),
            rec("M3", "MUSA", 10, 9),
        ]);
        let order: Vec<&str> = groups[0].records.iter().map(|r| r.barcode.as_str()).collect();
        assert_eq!(order, vec!["M2", "M1", "M3"]);
    }

    #[test]
    fn test_equal_mean_age_keeps_first_appearance_order() {
        let grouper = StrainGrouper::new();
        let groups = grouper.group(vec![
            rec("Z1", "ZEBRA", 10, 8),
            rec("A1", "ALPHA", 10, 8),
            rec("Z2", "ZEBRA", 10, 8),
        ]);
        let order: Vec<&str> = groups.iter().map(|g| g.strain_code.as_str()).collect();
        assert_eq!(order, vec!["ZEBRA", "ALPHA"]);
    }

    #[test]
    fn test_strain_codes_grouped_exactly() {
        let grouper = StrainGrouper::new();
        let groups = grouper.group(vec![rec("A", "Brahy", 1, 9), rec("B", "BRAHY", 1, 9)]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(StrainGrouper::new().group(Vec::new()).is_empty());
    }
}
