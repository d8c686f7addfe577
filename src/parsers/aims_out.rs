//! # FHI-aims 标准输出解析器
//!
//! 从 aims 的 stdout 日志中提取 Mulliken 电荷与弛豫能量。
//! 所有锚点字面量与偏移都对应 aims 固定的输出格式。
//!
//! ## 依赖关系
//! - 被 `commands/mulliken.rs`, `commands/energies.rs` 使用
//! - 使用 `parsers/report.rs`, `models/`

use crate::error::{AimsError, Result};
use crate::models::{AtomCharge, MullikenAnalysis, RelaxationRun};
use crate::parsers::report::{Anchor, RawReport};
use std::collections::{BTreeMap, BTreeSet};

// ─────────────────────────────────────────────────────────────
// 锚点定义
// ─────────────────────────────────────────────────────────────

/// "  | Number of species                      :        2"
pub const SPECIES_COUNT: Anchor = Anchor::contains("| Number of species");

/// "  Reading configuration options for species Au                  ."
pub const SPECIES_DECLARATION: Anchor =
    Anchor::contains("Reading configuration options for species");

/// 结构块第一行原子在标题下方两行
pub const STRUCTURE_START: Anchor = Anchor::contains("| Atomic structure:").with_offset(2);

pub const STRUCTURE_END: Anchor =
    Anchor::contains("Lattice parameters for 3D lattice").with_offset(-2);

/// Mulliken 表格第一行原子在标题下方八行
pub const MULLIKEN_START: Anchor = Anchor::contains("Starting Mulliken Analysis").with_offset(8);

pub const MULLIKEN_END: Anchor =
    Anchor::contains("Writing Mulliken decomposition to disk").with_offset(-4);

/// 正常结束标志
pub const COMPLETION: Anchor = Anchor::contains("Have a nice day.");

/// "  | Number of relaxation steps              :        12"
pub const RELAXATION_STEPS: Anchor = Anchor::contains("Number of relaxation steps");

/// "  | Total energy corrected        :         -0.158234567890E+05 eV"
pub const CORRECTED_ENERGY: Anchor = Anchor::contains("| Total energy corrected");

// ─────────────────────────────────────────────────────────────
// Mulliken 电荷
// ─────────────────────────────────────────────────────────────

/// 解析 Mulliken 分析所需的物种、结构与电荷
pub fn parse_mulliken(report: &RawReport) -> Result<MullikenAnalysis> {
    let species = parse_species(report)?;
    let sites = parse_structure_sites(report, &species)?;
    let charges = parse_mulliken_charges(report, &sites)?;

    Ok(MullikenAnalysis {
        species,
        sites,
        charges,
    })
}

/// 物种数与按声明顺序排列的物种标签
pub fn parse_species(report: &RawReport) -> Result<Vec<String>> {
    let count_line = report.find_anchor(&SPECIES_COUNT)?;
    let n_species: usize = report.tokens(count_line)?.parse(5)?;

    let declarations = report.find_all(&SPECIES_DECLARATION);
    if declarations.len() < n_species {
        return Err(AimsError::AnchorNotFound {
            anchor: format!(
                "{} (found {} of {})",
                SPECIES_DECLARATION.pattern,
                declarations.len(),
                n_species
            ),
            path: report.path().to_string(),
        });
    }

    declarations
        .into_iter()
        .take(n_species)
        .map(|idx| Ok(report.tokens(idx)?.field(5)?.to_string()))
        .collect()
}

/// 结构块：原子序号 → 物种
///
/// 行格式 "|       1: Species Au      0.000  0.000  0.000"
fn parse_structure_sites(
    report: &RawReport,
    species: &[String],
) -> Result<BTreeMap<usize, String>> {
    let range = report.block(&STRUCTURE_START, &STRUCTURE_END)?;
    if range.is_empty() {
        return Err(AimsError::MalformedLine {
            path: report.path().to_string(),
            line: range.start + 1,
            reason: "atomic structure block is empty".to_string(),
        });
    }
    let mut sites = BTreeMap::new();

    for idx in range.indices() {
        let tokens = report.tokens(idx)?;
        let raw_index = tokens.field(1)?;
        let atom_index: usize =
            raw_index
                .trim_end_matches(':')
                .parse()
                .map_err(|_| AimsError::MalformedLine {
                    path: report.path().to_string(),
                    line: idx + 1,
                    reason: format!("'{}' is not an atom number", raw_index),
                })?;
        let label = tokens.field(3)?;

        if !species.iter().any(|s| s == label) {
            return Err(AimsError::MalformedLine {
                path: report.path().to_string(),
                line: idx + 1,
                reason: format!("species '{}' was not declared", label),
            });
        }
        if sites.insert(atom_index, label.to_string()).is_some() {
            return Err(AimsError::MalformedLine {
                path: report.path().to_string(),
                line: idx + 1,
                reason: format!("atom {} listed twice", atom_index),
            });
        }
    }

    Ok(sites)
}

/// Mulliken 块：(原子序号, 电荷)，保持文件顺序
///
/// 行格式 "|     1      78.904        0.096 ..."
fn parse_mulliken_charges(
    report: &RawReport,
    sites: &BTreeMap<usize, String>,
) -> Result<Vec<AtomCharge>> {
    let range = report.block(&MULLIKEN_START, &MULLIKEN_END)?;
    let mut charges = Vec::with_capacity(range.len());
    let mut seen = BTreeSet::new();

    for idx in range.indices() {
        let tokens = report.tokens(idx)?;
        let index: usize = tokens.parse(1)?;
        let charge: f64 = tokens.parse(3)?;

        if !sites.contains_key(&index) {
            return Err(AimsError::MalformedLine {
                path: report.path().to_string(),
                line: idx + 1,
                reason: format!("atom {} is not in the atomic structure block", index),
            });
        }
        if !seen.insert(index) {
            return Err(AimsError::MalformedLine {
                path: report.path().to_string(),
                line: idx + 1,
                reason: format!("atom {} listed twice in Mulliken block", index),
            });
        }
        charges.push(AtomCharge::new(index, charge).with_raw(tokens.field(3)?));
    }

    if charges.len() != sites.len() {
        return Err(AimsError::MalformedLine {
            path: report.path().to_string(),
            line: range.start + 1,
            reason: format!(
                "Mulliken block lists {} atoms, structure block has {}",
                charges.len(),
                sites.len()
            ),
        });
    }

    Ok(charges)
}

// ─────────────────────────────────────────────────────────────
// 弛豫能量
// ─────────────────────────────────────────────────────────────

/// 解析单个计算目录的输出
///
/// 缺少结束标志时返回 `IncompleteRun`。
pub fn parse_relaxation_run(report: &RawReport, run_id: i64) -> Result<RelaxationRun> {
    if !report.contains(&COMPLETION) {
        return Err(AimsError::IncompleteRun {
            run: run_id,
            path: report.path().to_string(),
        });
    }

    let steps_line = report.find_anchor(&RELAXATION_STEPS)?;
    let steps: u32 = report.tokens(steps_line)?.parse(6)?;

    let energies = report
        .find_all(&CORRECTED_ENERGY)
        .into_iter()
        .map(|idx| report.tokens(idx)?.parse::<f64>(5))
        .collect::<Result<Vec<f64>>>()?;

    RelaxationRun::from_energies(run_id, steps, &energies).ok_or_else(|| {
        AimsError::AnchorNotFound {
            anchor: CORRECTED_ENERGY.pattern.to_string(),
            path: report.path().to_string(),
        }
    })
}
