//! # Mulliken 电荷数据模型
//!
//! 原子序号 → 物种 与 原子序号 → 电荷 两张映射按序号连接，
//! 再按物种求和、求平均。
//!
//! ## 依赖关系
//! - 被 `parsers/aims_out.rs` 构建
//! - 被 `commands/mulliken.rs` 使用

use std::collections::{BTreeMap, HashMap};

/// Mulliken 块中的一行：原子序号与部分电荷（正值 = 失去电子）
#[derive(Debug, Clone, PartialEq)]
pub struct AtomCharge {
    pub index: usize,
    pub charge: f64,
    /// 报告中电荷字段的原文，写出时原样保留
    pub raw: String,
}

impl AtomCharge {
    pub fn new(index: usize, charge: f64) -> Self {
        AtomCharge {
            index,
            charge,
            raw: charge.to_string(),
        }
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }
}

/// 连接后的原子记录
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub index: usize,
    pub species: String,
    pub charge: f64,
}

/// 单个物种的电荷汇总
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesCharge {
    pub species: String,
    pub atom_count: usize,
    pub total_charge: f64,
}

impl SpeciesCharge {
    /// 每原子平均电荷，物种没有原子时为 `None`
    pub fn average_charge(&self) -> Option<f64> {
        if self.atom_count == 0 {
            None
        } else {
            Some(self.total_charge / self.atom_count as f64)
        }
    }
}

/// 一次 Mulliken 分析的完整结果
#[derive(Debug, Clone, Default)]
pub struct MullikenAnalysis {
    /// 按声明顺序排列的物种
    pub species: Vec<String>,
    /// 结构块：原子序号 → 物种
    pub sites: BTreeMap<usize, String>,
    /// Mulliken 块中的电荷，保持文件顺序
    pub charges: Vec<AtomCharge>,
}

impl MullikenAnalysis {
    /// 结构块中的原子总数
    pub fn atom_count(&self) -> usize {
        self.sites.len()
    }

    /// 按原子序号连接物种与电荷，保持 Mulliken 块顺序
    ///
    /// 序号不在结构块中的电荷会被跳过；解析器保证不会出现这种情况。
    pub fn records(&self) -> Vec<AtomRecord> {
        self.charges
            .iter()
            .filter_map(|c| {
                self.sites.get(&c.index).map(|species| AtomRecord {
                    index: c.index,
                    species: species.clone(),
                    charge: c.charge,
                })
            })
            .collect()
    }

    /// 每个物种的原子数与总电荷，按声明顺序
    pub fn species_summary(&self) -> Vec<SpeciesCharge> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for species in self.sites.values() {
            *counts.entry(species.as_str()).or_insert(0) += 1;
        }

        let mut totals: HashMap<String, f64> = HashMap::new();
        for record in self.records() {
            *totals.entry(record.species).or_insert(0.0) += record.charge;
        }

        self.species
            .iter()
            .map(|s| SpeciesCharge {
                species: s.clone(),
                atom_count: counts.get(s.as_str()).copied().unwrap_or(0),
                total_charge: totals.get(s).copied().unwrap_or(0.0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(charges: Vec<AtomCharge>) -> MullikenAnalysis {
        let mut sites = BTreeMap::new();
        sites.insert(1, "Au".to_string());
        sites.insert(2, "N".to_string());
        sites.insert(3, "Au".to_string());
        MullikenAnalysis {
            species: vec!["Au".to_string(), "N".to_string(), "H".to_string()],
            sites,
            charges,
        }
    }

    #[test]
    fn test_species_summary_joins_by_index() {
        let a = analysis(vec![
            AtomCharge::new(1, 0.25),
            AtomCharge::new(2, -0.5),
            AtomCharge::new(3, 0.75),
        ]);
        let summary = a.species_summary();

        assert_eq!(summary[0].species, "Au");
        assert_eq!(summary[0].atom_count, 2);
        assert!((summary[0].total_charge - 1.0).abs() < 1e-12);
        assert!((summary[0].average_charge().unwrap() - 0.5).abs() < 1e-12);
        assert!((summary[1].total_charge + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_summary_independent_of_line_order() {
        let ordered = analysis(vec![
            AtomCharge::new(1, 0.1),
            AtomCharge::new(2, -0.2),
            AtomCharge::new(3, 0.3),
        ]);
        let shuffled = analysis(vec![
            AtomCharge::new(3, 0.3),
            AtomCharge::new(1, 0.1),
            AtomCharge::new(2, -0.2),
        ]);
        assert_eq!(ordered.species_summary(), shuffled.species_summary());
    }

    #[test]
    fn test_species_without_atoms() {
        let a = analysis(vec![]);
        let summary = a.species_summary();
        assert_eq!(summary[2].species, "H");
        assert_eq!(summary[2].atom_count, 0);
        assert_eq!(summary[2].average_charge(), None);

        let counted: usize = summary.iter().map(|s| s.atom_count).sum();
        assert_eq!(counted, a.atom_count());
    }

    #[test]
    fn test_records_keep_mulliken_order() {
        let a = analysis(vec![
            AtomCharge::new(2, -0.2),
            AtomCharge::new(1, 0.1),
        ]);
        let records = a.records();
        assert_eq!(records[0].index, 2);
        assert_eq!(records[0].species, "N");
        assert_eq!(records[1].species, "Au");
    }
}
