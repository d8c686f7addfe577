//! # dos 命令实现
//!
//! 对目录中的 `atom_projected_dos_<El><NNNN>.dat` 按元素求和，
//! 再把各元素曲线的总 DOS 列加成一条总曲线。
//!
//! ## 功能
//! - 从文件名发现元素（忽略 `raw` 文件）
//! - 每个元素的所有原子文件逐元素求和，写出 `element-projected_dos_<El>.dat`
//! - 重新扫描本次写出的元素文件，求和得到 `element-projected_dos_total-sum.dat`
//! - 可选 PNG 曲线图
//!
//! ## 依赖关系
//! - 使用 `cli/dos.rs` 定义的参数
//! - 使用 `parsers/dos_table.rs`, `export/dat.rs`, `export/plot.rs`
//! - 使用 `utils/collector.rs`, `utils/progress.rs`

use crate::cli::dos::DosArgs;
use crate::error::{AimsError, Result};
use crate::export::{dat, plot};
use crate::models::DosCurve;
use crate::parsers::dos_table;
use crate::utils::collector::{self, FileCollector};
use crate::utils::{output, progress};

use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const ATOM_DOS_PATTERN: &str = r"^atom_projected_dos_(.+?)(\d{4})\.dat$";
const ELEMENT_DOS_PATTERN: &str = r"^element-projected_dos_(.+)\.dat$";

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| AimsError::Other(format!("Invalid pattern '{}': {}", pattern, e)))
}

/// 单个元素的求和结果
#[derive(Debug, Clone)]
pub struct ElementDos {
    pub element: String,
    pub atom_count: usize,
    pub curve: DosCurve,
}

/// 执行 DOS 求和
pub fn execute(args: DosArgs) -> Result<()> {
    output::print_header("Element-projected DOS");

    if !args.dir.is_dir() {
        return Err(AimsError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    let elements = discover_elements(&args.dir)?;
    if elements.is_empty() {
        return Err(AimsError::NoFilesFound {
            pattern: ATOM_DOS_PATTERN.to_string(),
        });
    }
    output::print_info(&format!("Found elements: {}", elements.join(", ")));

    let strict = !args.skip_grid_check;
    if !strict {
        output::print_warning("Energy grid check disabled, only row/column counts are compared");
    }

    let mut summed = Vec::with_capacity(elements.len());
    let mut total_atoms = 0;
    for element in &elements {
        let result = sum_element(&args.dir, element, strict)?;
        let path = args.dir.join(dat::element_dos_file_name(element));
        dat::write_text(&path, &dat::dos_to_string(&result.curve))?;

        output::print_success(&format!("{} {} atoms read", result.atom_count, element));
        total_atoms += result.atom_count;
        summed.push(result);
    }
    output::print_info(&format!("{} atoms read in total", total_atoms));

    let written: Vec<String> = summed.iter().map(|e| e.element.clone()).collect();
    let element_files = collect_element_files(&args.dir, &written)?;
    let total = sum_element_totals(&element_files)?;

    let total_path = args.dir.join(dat::element_dos_file_name(dat::DOS_TOTAL_LABEL));
    dat::write_text(&total_path, &dat::dos_to_string(&total))?;
    output::print_info(&format!(
        "{} elements summed into '{}'",
        element_files.len(),
        total_path.display()
    ));

    if let Some(ref plot_path) = args.plot {
        let curves: Vec<(String, DosCurve)> = summed
            .iter()
            .map(|e| (e.element.clone(), e.curve.total_column()))
            .collect();
        plot::generate_dos_plot(&curves, &total, plot_path, args.width, args.height)?;
        output::print_success(&format!("Plot saved to '{}'", plot_path.display()));
    }

    output::print_done(&format!(
        "{} element files written to '{}'",
        summed.len(),
        args.dir.display()
    ));

    Ok(())
}

/// 从原子投影 DOS 文件名中发现元素，按字母序去重
pub fn discover_elements(dir: &Path) -> Result<Vec<String>> {
    let re = compile(ATOM_DOS_PATTERN)?;
    let files = FileCollector::new(dir).with_regex(re.clone()).collect();

    let elements: BTreeSet<String> = files
        .iter()
        .map(|p| collector::file_name(p))
        .filter(|name| !name.contains("raw"))
        .filter_map(|name| re.captures(name).map(|c| c[1].to_string()))
        .collect();

    Ok(elements.into_iter().collect())
}

/// 某元素全部原子的 DOS 文件
pub fn element_atom_files(dir: &Path, element: &str) -> Result<Vec<PathBuf>> {
    let re = compile(&format!(
        r"^atom_projected_dos_{}\d{{4}}\.dat$",
        regex::escape(element)
    ))?;
    Ok(FileCollector::new(dir).with_regex(re).collect())
}

/// 对一个元素的所有原子文件求和
pub fn sum_element(dir: &Path, element: &str, strict: bool) -> Result<ElementDos> {
    let files = element_atom_files(dir, element)?;
    if files.is_empty() {
        return Err(AimsError::NoFilesForElement {
            element: element.to_string(),
        });
    }

    let curve = sum_dos_files(&files, strict)?;
    Ok(ElementDos {
        element: element.to_string(),
        atom_count: files.len(),
        curve,
    })
}

/// 逐元素累加多个 DOS 文件，第一个文件的网格为准
pub fn sum_dos_files(files: &[PathBuf], strict: bool) -> Result<DosCurve> {
    let (first, rest) = files
        .split_first()
        .ok_or_else(|| AimsError::InvalidArgument("no DOS files to sum".to_string()))?;

    let pb = progress::create_progress_bar(files.len() as u64, "Summing");

    let mut sum = dos_table::parse_dos_file(first)?;
    pb.inc(1);

    for path in rest {
        let curve = dos_table::parse_dos_file(path)?;
        let checked = if strict {
            sum.check_grid(&curve)
        } else {
            sum.check_shape(&curve)
        };
        checked
            .and_then(|_| sum.accumulate(&curve))
            .map_err(|reason| AimsError::GridMismatch {
                path: path.display().to_string(),
                reason,
            })?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(sum)
}

/// 重新扫描目录中的元素文件，只保留 `elements` 中的（不含旧的总和文件）
pub fn collect_element_files(dir: &Path, elements: &[String]) -> Result<Vec<PathBuf>> {
    let re = compile(ELEMENT_DOS_PATTERN)?;
    let files = FileCollector::new(dir)
        .with_regex(re.clone())
        .collect()
        .into_iter()
        .filter(|p| {
            re.captures(collector::file_name(p))
                .map(|c| &c[1] != dat::DOS_TOTAL_LABEL && elements.iter().any(|e| *e == c[1]))
                .unwrap_or(false)
        })
        .collect();
    Ok(files)
}

/// 对元素文件的总 DOS 列求和
pub fn sum_element_totals(files: &[PathBuf]) -> Result<DosCurve> {
    let mut total: Option<DosCurve> = None;

    for path in files {
        let curve = dos_table::parse_dos_file(path)?.total_column();
        match total {
            None => total = Some(curve),
            Some(ref mut sum) => {
                sum.accumulate(&curve)
                    .map_err(|reason| AimsError::GridMismatch {
                        path: path.display().to_string(),
                        reason,
                    })?;
            }
        }
    }

    total.ok_or_else(|| AimsError::NoFilesFound {
        pattern: ELEMENT_DOS_PATTERN.to_string(),
    })
}
