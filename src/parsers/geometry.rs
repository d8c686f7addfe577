//! # FHI-aims geometry.in 解析器
//!
//! ## geometry.in 格式说明
//! ```text
//! lattice_vector  a1 a2 a3
//! lattice_vector  b1 b2 b3
//! lattice_vector  c1 c2 c3
//! atom       x y z  Species
//! atom_frac  x y z  Species
//! ```
//! 只读取 `lattice_vector` 与 `atom`/`atom_frac` 行，其他关键字忽略。
//!
//! ## 依赖关系
//! - 被 `commands/zcoord.rs` 使用
//! - 使用 `parsers/report.rs`, `models/structure.rs`

use crate::error::{AimsError, Result};
use crate::models::{Atom, CoordinateMode, Geometry, Lattice};
use crate::parsers::report::{Anchor, RawReport};
use std::path::Path;

pub const LATTICE_VECTOR: Anchor = Anchor::starts_with("lattice_vector");
pub const ATOM: Anchor = Anchor::starts_with("atom");

/// 解析 geometry.in 文件
pub fn parse_geometry_file(path: &Path) -> Result<Geometry> {
    let report = RawReport::from_file(path)?;
    parse_geometry(&report)
}

/// 从已读入的报告解析结构
pub fn parse_geometry(report: &RawReport) -> Result<Geometry> {
    let mut vectors: Vec<[f64; 3]> = Vec::new();
    let mut atoms: Vec<Atom> = Vec::new();
    let mut mode: Option<CoordinateMode> = None;

    for (idx, line) in report.lines().iter().enumerate() {
        if LATTICE_VECTOR.matches(line) {
            let tokens = report.tokens(idx)?;
            vectors.push([tokens.parse(1)?, tokens.parse(2)?, tokens.parse(3)?]);
        } else if ATOM.matches(line) {
            let tokens = report.tokens(idx)?;
            let line_mode = match tokens.field(0)? {
                "atom" => CoordinateMode::Cartesian,
                "atom_frac" => CoordinateMode::Fractional,
                _ => continue,
            };
            if mode.is_none() {
                mode = Some(line_mode);
            }
            atoms.push(Atom::new(
                tokens.field(4)?,
                [tokens.parse(1)?, tokens.parse(2)?, tokens.parse(3)?],
            ));
        }
    }

    let mode = mode.ok_or_else(|| AimsError::AnchorNotFound {
        anchor: ATOM.pattern.to_string(),
        path: report.path().to_string(),
    })?;

    let lattice = match vectors.as_slice() {
        [a, b, c, ..] => Some(Lattice::from_vectors([*a, *b, *c])),
        _ => None,
    };

    if mode == CoordinateMode::Fractional && lattice.is_none() {
        return Err(AimsError::AnchorNotFound {
            anchor: LATTICE_VECTOR.pattern.to_string(),
            path: report.path().to_string(),
        });
    }

    Ok(Geometry {
        name: report.path().to_string(),
        lattice,
        atoms,
        mode,
    })
}
