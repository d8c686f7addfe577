//! # `.dat` 表格导出
//!
//! 输出格式：`#` 注释表头 + 空白分隔数值列。
//! DOS 表格每个数值固定宽度 `12.8f`，后接一个空格。
//!
//! ## 依赖关系
//! - 被 `commands/mulliken.rs`, `commands/energies.rs`, `commands/dos.rs` 调用
//! - 使用 `models/`

use crate::error::{AimsError, Result};
use crate::models::{AtomCharge, DosCurve, RelaxationRun};

use std::fs;
use std::path::Path;

pub const MULLIKEN_FILE: &str = "mulliken_partial_charges.dat";
pub const ENERGIES_FILE: &str = "energies_from_aims_output.dat";
pub const DOS_PREFIX: &str = "element-projected_dos_";
pub const DOS_TOTAL_LABEL: &str = "total-sum";

/// 单元素 DOS 文件名
pub fn element_dos_file_name(element: &str) -> String {
    format!("{}{}.dat", DOS_PREFIX, element)
}

/// 每原子 Mulliken 电荷表，保持原文件顺序
pub fn charges_to_string(charges: &[AtomCharge]) -> String {
    let mut result = String::from("# Atom number, partial charge (positive = losing electrons)\n");
    for c in charges {
        result.push_str(&format!("{} {}\n", c.index, c.raw));
    }
    result
}

/// 多目录能量表，保持输入顺序
pub fn runs_to_string(runs: &[RelaxationRun]) -> String {
    let mut result = String::from("# Structure no., Relax. steps, E_initial, E_final\n");
    for run in runs {
        result.push_str(&format!(
            "{} {} {:?} {:?}\n",
            run.run_id, run.steps, run.initial_energy, run.final_energy
        ));
    }
    result
}

/// DOS 曲线表，第一列为能量
pub fn dos_to_string(curve: &DosCurve) -> String {
    let mut labels = vec!["Energy (eV)".to_string(), "Total DOS".to_string()];
    labels.extend((0..curve.n_values().saturating_sub(1)).map(|l| format!("l={}", l)));

    let header = labels
        .iter()
        .map(|l| format!("{:<13}", l))
        .collect::<String>();

    let mut result = format!("# {}\n", header.trim_end());
    for (energy, row) in curve.energies.iter().zip(&curve.values) {
        result.push_str(&format!("{:12.8} ", energy));
        for v in row {
            result.push_str(&format!("{:12.8} ", v));
        }
        result.push('\n');
    }
    result
}

/// 写入文本文件（覆盖已有文件）
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| AimsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charges_table() {
        let s = charges_to_string(&[
            AtomCharge::new(2, 0.5),
            AtomCharge::new(1, -0.25),
        ]);
        let lines: Vec<&str> = s.lines().collect();
        assert!(lines[0].starts_with('#'));
        assert_eq!(lines[1], "2 0.5");
        assert_eq!(lines[2], "1 -0.25");
    }

    #[test]
    fn test_charges_table_keeps_report_text() {
        let s = charges_to_string(&[AtomCharge::new(3, -0.1).with_raw("-0.100000")]);
        assert_eq!(s.lines().nth(1), Some("3 -0.100000"));
    }

    #[test]
    fn test_runs_table() {
        let run = RelaxationRun::from_energies(12, 4, &[-100.0, -100.25]).unwrap();
        let s = runs_to_string(&[run]);
        assert_eq!(s.lines().nth(1), Some("12 4 -100.0 -100.25"));
    }

    #[test]
    fn test_dos_fixed_width() {
        let curve = DosCurve::new(vec![-1.5, 0.0], vec![vec![0.25, 0.125], vec![1.0, 0.5]]);
        let s = dos_to_string(&curve);
        let lines: Vec<&str> = s.lines().collect();

        assert!(lines[0].starts_with("# Energy (eV)"));
        assert!(lines[0].contains("l=0"));
        assert!(!lines[0].contains("l=1"));
        assert_eq!(lines[1], " -1.50000000   0.25000000   0.12500000 ");
        assert_eq!(lines[2], "  0.00000000   1.00000000   0.50000000 ");
    }

    #[test]
    fn test_element_file_name() {
        assert_eq!(element_dos_file_name("Au"), "element-projected_dos_Au.dat");
        assert_eq!(
            element_dos_file_name(DOS_TOTAL_LABEL),
            "element-projected_dos_total-sum.dat"
        );
    }
}
