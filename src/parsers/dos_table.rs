//! # DOS 数据文件解析器
//!
//! 读取 aims 输出的 `atom_projected_dos_*.dat` 以及本工具写出的
//! `element-projected_dos_*.dat`。格式为空白分隔的数值列，`#` 开头为注释，
//! 第一列为能量。
//!
//! ## 依赖关系
//! - 被 `commands/dos.rs` 使用
//! - 使用 `models/dos.rs`

use crate::error::{AimsError, Result};
use crate::models::DosCurve;
use std::fs;
use std::path::Path;

/// 解析 DOS 数据文件
pub fn parse_dos_file(path: &Path) -> Result<DosCurve> {
    let content = fs::read_to_string(path).map_err(|e| AimsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_dos_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 DOS 表
pub fn parse_dos_content(content: &str, name: &str) -> Result<DosCurve> {
    let mut energies = Vec::new();
    let mut values = Vec::new();
    let mut n_columns: Option<usize> = None;

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|s| s.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|_| AimsError::MalformedLine {
                path: name.to_string(),
                line: idx + 1,
                reason: "non-numeric value in DOS table".to_string(),
            })?;

        let expected = *n_columns.get_or_insert(row.len());
        if row.len() != expected {
            return Err(AimsError::MalformedLine {
                path: name.to_string(),
                line: idx + 1,
                reason: format!("expected {} columns, found {}", expected, row.len()),
            });
        }

        energies.push(row[0]);
        values.push(row[1..].to_vec());
    }

    if energies.is_empty() {
        return Err(AimsError::MalformedLine {
            path: name.to_string(),
            line: 0,
            reason: "DOS table has no data rows".to_string(),
        });
    }

    Ok(DosCurve::new(energies, values))
}
