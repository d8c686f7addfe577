//! # mulliken 命令实现
//!
//! 从 FHI-aims 输出中提取 Mulliken 部分电荷，按物种求和与平均。
//!
//! ## 功能
//! - 物种声明、结构块、Mulliken 块三处锚点定位
//! - 按原子序号连接物种与电荷
//! - 每原子电荷写入 `mulliken_partial_charges.dat`（原文件顺序）
//! - 终端表格输出每物种总电荷与平均电荷
//!
//! ## 依赖关系
//! - 使用 `cli/mulliken.rs` 定义的参数
//! - 使用 `parsers/aims_out.rs`, `export/`
//! - 使用 `utils/output.rs`

use crate::cli::mulliken::MullikenArgs;
use crate::error::{AimsError, Result};
use crate::export::{dat, table};
use crate::models::SpeciesCharge;
use crate::parsers::{aims_out, RawReport};
use crate::utils::{output, sibling_path};

use tabled::{Table, Tabled};

/// 物种电荷汇总行
#[derive(Debug, Clone, Tabled)]
struct SpeciesRow {
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Atoms")]
    atoms: usize,
    #[tabled(rename = "Total charge")]
    total: String,
    #[tabled(rename = "Average charge")]
    average: String,
}

impl From<&SpeciesCharge> for SpeciesRow {
    fn from(s: &SpeciesCharge) -> Self {
        SpeciesRow {
            species: s.species.clone(),
            atoms: s.atom_count,
            total: format!("{:.6}", s.total_charge),
            average: s
                .average_charge()
                .map(|a| format!("{:.6}", a))
                .unwrap_or_else(|| "n/a".to_string()),
        }
    }
}

/// 执行 Mulliken 分析
pub fn execute(args: MullikenArgs) -> Result<()> {
    output::print_header("Mulliken Charge Analysis");

    if !args.input.is_file() {
        return Err(AimsError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let report = RawReport::from_file(&args.input)?;
    let analysis = aims_out::parse_mulliken(&report)?;

    for (i, s) in analysis.species.iter().enumerate() {
        output::print_info(&format!("Species {}: {}", i + 1, s));
    }
    output::print_info(&format!(
        "{} atoms in structure (positive charge = losing electrons)",
        analysis.atom_count()
    ));

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input, dat::MULLIKEN_FILE));
    dat::write_text(&out_path, &dat::charges_to_string(&analysis.charges))?;

    let summary = analysis.species_summary();
    let rows: Vec<SpeciesRow> = summary.iter().map(SpeciesRow::from).collect();
    println!("\n{}\n", Table::new(&rows));

    if let Some(ref csv_path) = args.csv {
        table::species_charges_to_csv(&summary, csv_path)?;
        output::print_success(&format!(
            "Species summary saved to '{}'",
            csv_path.display()
        ));
    }

    output::print_done(&format!(
        "Mulliken charges written to '{}'",
        out_path.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::aims_out::tests::MULLIKEN_OUTPUT;
    use std::fs;

    #[test]
    fn test_execute_writes_charge_table() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("aims.out");
        fs::write(&input, MULLIKEN_OUTPUT).unwrap();
        let csv_path = dir.path().join("species.csv");

        execute(MullikenArgs {
            input,
            output: None,
            csv: Some(csv_path.clone()),
        })
        .unwrap();

        let written = fs::read_to_string(dir.path().join(dat::MULLIKEN_FILE)).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "2 0.123457");
        assert_eq!(lines[2], "1 -0.100000");
        assert_eq!(lines[3], "3 -0.050000");

        assert!(csv_path.exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = execute(MullikenArgs {
            input: dir.path().join("missing.out"),
            output: None,
            csv: None,
        })
        .unwrap_err();
        assert!(matches!(err, AimsError::FileNotFound { .. }));
    }

    #[test]
    fn test_species_row_without_atoms() {
        let row = SpeciesRow::from(&SpeciesCharge {
            species: "H".to_string(),
            atom_count: 0,
            total_charge: 0.0,
        });
        assert_eq!(row.total, "0.000000");
        assert_eq!(row.average, "n/a");
    }
}
