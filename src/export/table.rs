//! # CSV 汇总导出
//!
//! 使用 `csv` + `serde` 将控制台汇总表另存为 CSV，方便后续处理。
//!
//! ## 依赖关系
//! - 被 `commands/mulliken.rs`, `commands/energies.rs` 调用
//! - 使用 `models/`

use crate::error::{AimsError, Result};
use crate::models::{RelaxationRun, SpeciesCharge};

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct SpeciesChargeRow<'a> {
    species: &'a str,
    atoms: usize,
    total_charge: f64,
    average_charge: Option<f64>,
}

#[derive(Debug, Serialize)]
struct RelaxationRow {
    run: i64,
    steps: u32,
    e_initial_ev: f64,
    e_final_ev: f64,
    delta_e_ev: f64,
}

/// 导出每物种电荷汇总
pub fn species_charges_to_csv(summary: &[SpeciesCharge], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for s in summary {
        wtr.serialize(SpeciesChargeRow {
            species: &s.species,
            atoms: s.atom_count,
            total_charge: s.total_charge,
            average_charge: s.average_charge(),
        })?;
    }

    wtr.flush().map_err(|e| AimsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出多目录弛豫能量
pub fn runs_to_csv(runs: &[RelaxationRun], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for run in runs {
        wtr.serialize(RelaxationRow {
            run: run.run_id,
            steps: run.steps,
            e_initial_ev: run.initial_energy,
            e_final_ev: run.final_energy,
            delta_e_ev: run.energy_change(),
        })?;
    }

    wtr.flush().map_err(|e| AimsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_species_csv() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("charges.csv");
        let summary = vec![
            SpeciesCharge {
                species: "Au".to_string(),
                atom_count: 2,
                total_charge: -0.5,
            },
            SpeciesCharge {
                species: "H".to_string(),
                atom_count: 0,
                total_charge: 0.0,
            },
        ];
        species_charges_to_csv(&summary, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "species,atoms,total_charge,average_charge");
        assert_eq!(lines[1], "Au,2,-0.5,-0.25");
        assert_eq!(lines[2], "H,0,0.0,");
    }

    #[test]
    fn test_runs_csv() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("runs.csv");
        let run = RelaxationRun::from_energies(5, 2, &[-10.0, -10.5]).unwrap();
        runs_to_csv(&[run], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("run,steps,e_initial_ev,e_final_ev,delta_e_ev\n"));
        assert!(content.contains("5,2,-10.0,-10.5,-0.5"));
    }
}
