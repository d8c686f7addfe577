//! # zcoord 命令实现
//!
//! 读取 geometry.in，按物种统计 z 坐标并打印层间距，
//! 给出分子物种时额外报告分子相对衬底各层的高度。
//!
//! ## 依赖关系
//! - 使用 `cli/zcoord.rs` 定义的参数
//! - 使用 `parsers/geometry.rs`, `models/layers.rs`
//! - 使用 `utils/output.rs`

use crate::cli::zcoord::ZcoordArgs;
use crate::error::{AimsError, Result};
use crate::models::{LayerAnalysis, LayerStats, MoleculeReport, Separation};
use crate::parsers::geometry;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 物种层统计行
#[derive(Debug, Clone, Tabled)]
struct LayerRow {
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "N_at.")]
    count: usize,
    #[tabled(rename = "z_avg")]
    avg: String,
    #[tabled(rename = "z_min")]
    min: String,
    #[tabled(rename = "z_max")]
    max: String,
    #[tabled(rename = "z_diff")]
    diff: String,
}

impl From<&LayerStats> for LayerRow {
    fn from(l: &LayerStats) -> Self {
        LayerRow {
            species: l.species.clone(),
            count: l.count,
            avg: format!("{:.4}", l.avg),
            min: format!("{:.4}", l.min),
            max: format!("{:.4}", l.max),
            diff: format!("{:.4}", l.corrugation()),
        }
    }
}

/// 执行 z 坐标分析
pub fn execute(args: ZcoordArgs) -> Result<()> {
    output::print_header("z-coordinate analysis");

    if !args.geometry.is_file() {
        return Err(AimsError::FileNotFound {
            path: args.geometry.display().to_string(),
        });
    }

    let geometry = geometry::parse_geometry_file(&args.geometry)?;
    let analysis = LayerAnalysis::from_geometry(&geometry)?;
    output::print_info(&format!(
        "{} atoms, {} coordinates",
        geometry.atoms.len(),
        geometry.mode
    ));

    // 先校验分子物种，避免输出一半后才报错
    let molecule = if args.molecule.is_empty() {
        None
    } else {
        Some(analysis.molecule(&args.molecule)?)
    };

    output::print_section("Species in the order of average z-coordinate, from top to bottom");
    let rows: Vec<LayerRow> = analysis
        .top_to_bottom()
        .into_iter()
        .map(LayerRow::from)
        .collect();
    println!("{}\n", Table::new(&rows));

    output::print_section("Layer separations based on average z-coordinates");
    for line in separation_lines(&analysis.separations()) {
        println!("{}", line);
    }

    if let Some(ref report) = molecule {
        println!();
        output::print_section(&format!(
            "Molecule defined with species: {}",
            report.species.join(", ")
        ));
        for line in molecule_lines(report) {
            println!("{}", line);
        }
    }

    output::print_done(&format!("Analyzed '{}'", args.geometry.display()));

    Ok(())
}

/// `A-B: d` 形式的层间距行
pub fn separation_lines(separations: &[Separation]) -> Vec<String> {
    separations
        .iter()
        .map(|s| format!("{}-{}: {:.4}", s.lower, s.upper, s.distance))
        .collect()
}

/// 分子高度报告
pub fn molecule_lines(report: &MoleculeReport) -> Vec<String> {
    let mut lines = vec![
        format!("Molecule has {} atoms", report.atom_count),
        format!("Molecule top height: {:.4}", report.top),
        format!("Molecule bottom height: {:.4}", report.bottom),
        format!("Molecule average height: {:.4}", report.average),
        format!(
            "Molecule corrugation (bend = top - bottom): {:.4}",
            report.corrugation()
        ),
    ];

    match report.above_substrate {
        Some((ref species, height)) => lines.push(format!(
            "Molecule height from {} (calculated from avg): {:.4}",
            species, height
        )),
        None => lines.push("No substrate species besides the molecule".to_string()),
    }

    if !report.heights.is_empty() {
        lines.push(String::new());
        lines.push("Molecule height from all species (calculated from avg):".to_string());
        for (species, height) in &report.heights {
            lines.push(format!("{}-mol: {:.4}", species, height));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::RawReport;
    use std::fs;

    const GEOMETRY: &str = "\
lattice_vector   2.88 0.00 0.00
lattice_vector   0.00 2.88 0.00
lattice_vector   0.00 0.00 20.0
atom  0.0 0.0 0.0 Au
atom  1.0 0.0 1.0 Au
atom  0.0 0.0 2.0 N
atom  0.0 0.0 3.0 H
";

    fn analysis() -> LayerAnalysis {
        let report = RawReport::from_content("geometry.in", GEOMETRY);
        LayerAnalysis::from_geometry(&geometry::parse_geometry(&report).unwrap()).unwrap()
    }

    #[test]
    fn test_top_to_bottom() {
        let a = analysis();
        let order: Vec<&str> = a.top_to_bottom().iter().map(|l| l.species.as_str()).collect();
        assert_eq!(order, vec!["H", "N", "Au"]);

        let row = LayerRow::from(a.top_to_bottom()[2]);
        assert_eq!(row.avg, "0.5000");
        assert_eq!(row.diff, "1.0000");
    }

    #[test]
    fn test_separation_lines() {
        let lines = separation_lines(&analysis().separations());
        assert_eq!(lines, vec!["Au-N: 1.5000", "Au-H: 2.5000", "N-H: 1.0000"]);
    }

    #[test]
    fn test_molecule_lines() {
        let report = analysis()
            .molecule(&["N".to_string(), "H".to_string()])
            .unwrap();
        let lines = molecule_lines(&report);
        assert_eq!(lines[0], "Molecule has 2 atoms");
        assert_eq!(lines[3], "Molecule average height: 2.5000");
        assert_eq!(lines[4], "Molecule corrugation (bend = top - bottom): 1.0000");
        assert_eq!(lines[5], "Molecule height from Au (calculated from avg): 2.0000");
        assert_eq!(lines.last().unwrap(), "Au-mol: 2.0000");
    }

    #[test]
    fn test_unknown_molecule_species() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("geometry.in");
        fs::write(&path, GEOMETRY).unwrap();

        let err = execute(ZcoordArgs {
            geometry: path.clone(),
            molecule: vec!["C".to_string()],
        })
        .unwrap_err();
        assert!(matches!(err, AimsError::UnknownSpecies { species } if species == "C"));

        execute(ZcoordArgs {
            geometry: path,
            molecule: vec!["H".to_string()],
        })
        .unwrap();
    }
}
