//! # energies 命令实现
//!
//! 从多个编号目录的 FHI-aims 输出中收集弛豫步数与初末能量。
//!
//! ## 功能
//! - 读取目录编号列表（每行一个整数，`#` 为注释）
//! - 检查每个计算是否正常结束，任何一个未完成即整体中止且不写输出
//! - 提取弛豫步数与全部 corrected total energy（首个为初始，末个为最终）
//! - 按输入顺序写出 `energies_from_aims_output.dat`
//!
//! ## 依赖关系
//! - 使用 `cli/energies.rs` 定义的参数
//! - 使用 `parsers/aims_out.rs`, `export/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::energies::EnergiesArgs;
use crate::error::{AimsError, Result};
use crate::export::{dat, table};
use crate::models::RelaxationRun;
use crate::parsers::{aims_out, RawReport};
use crate::utils::{output, progress, sibling_path};

use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 能量汇总行
#[derive(Debug, Clone, Tabled)]
struct RunRow {
    #[tabled(rename = "Run")]
    run: i64,
    #[tabled(rename = "Steps")]
    steps: u32,
    #[tabled(rename = "E_initial (eV)")]
    initial: String,
    #[tabled(rename = "E_final (eV)")]
    last: String,
    #[tabled(rename = "ΔE (eV)")]
    delta: String,
}

/// 执行能量收集
pub fn execute(args: EnergiesArgs) -> Result<()> {
    output::print_header("Collecting FHI-aims Relaxation Energies");

    if !args.list.is_file() {
        return Err(AimsError::FileNotFound {
            path: args.list.display().to_string(),
        });
    }

    let run_ids = read_run_list(&args.list)?;
    if run_ids.is_empty() {
        return Err(AimsError::InvalidArgument(format!(
            "No run directories listed in '{}'",
            args.list.display()
        )));
    }

    let base_dir = args
        .base_dir
        .clone()
        .unwrap_or_else(|| sibling_path(&args.list, ""));
    output::print_info(&format!(
        "Reading '{}' from {} run directories...",
        args.output_name,
        run_ids.len()
    ));

    let runs = collect_runs(&base_dir, &args.output_name, &run_ids)?;

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| base_dir.join(dat::ENERGIES_FILE));
    dat::write_text(&out_path, &dat::runs_to_string(&runs))?;

    let rows: Vec<RunRow> = runs
        .iter()
        .map(|r| RunRow {
            run: r.run_id,
            steps: r.steps,
            initial: format!("{:.6}", r.initial_energy),
            last: format!("{:.6}", r.final_energy),
            delta: format!("{:.6}", r.energy_change()),
        })
        .collect();
    println!("\n{}\n", Table::new(&rows));

    if let Some(ref csv_path) = args.csv {
        table::runs_to_csv(&runs, csv_path)?;
        output::print_success(&format!("CSV table saved to '{}'", csv_path.display()));
    }

    output::print_done(&format!(
        "Energies of {} runs written to '{}'",
        runs.len(),
        out_path.display()
    ));

    Ok(())
}

/// 读取目录编号列表
pub fn read_run_list(path: &Path) -> Result<Vec<i64>> {
    let content = fs::read_to_string(path).map_err(|e| AimsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut ids = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        for token in line.split_whitespace() {
            let id = token.parse::<i64>().map_err(|_| AimsError::MalformedLine {
                path: path.display().to_string(),
                line: idx + 1,
                reason: format!("'{}' is not a run number", token),
            })?;
            ids.push(id);
        }
    }

    Ok(ids)
}

/// 每次运行的输出文件路径 `<base>/<id>/<output_name>`
pub fn run_output_path(base_dir: &Path, run_id: i64, output_name: &str) -> PathBuf {
    base_dir.join(run_id.to_string()).join(output_name)
}

/// 依次解析全部运行，遇到第一个错误立即返回
pub fn collect_runs(
    base_dir: &Path,
    output_name: &str,
    run_ids: &[i64],
) -> Result<Vec<RelaxationRun>> {
    let pb = progress::create_progress_bar(run_ids.len() as u64, "Parsing");

    let runs = run_ids
        .iter()
        .map(|&id| {
            let report = RawReport::from_file(&run_output_path(base_dir, id, output_name))?;
            let run = aims_out::parse_relaxation_run(&report, id);
            pb.inc(1);
            run
        })
        .collect::<Result<Vec<_>>>();

    pb.finish_and_clear();
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aims_output(energies: &[f64], steps: u32, finished: bool) -> String {
        let mut s = String::from("  Invoking FHI-aims ...\n");
        for e in energies {
            s.push_str(&format!(
                "  | Total energy corrected        :         {:.12E} eV\n",
                e
            ));
        }
        s.push_str(&format!(
            "  | Number of relaxation steps              :        {}\n",
            steps
        ));
        if finished {
            s.push_str("          Have a nice day.\n");
        }
        s
    }

    fn write_run(base: &Path, id: i64, content: &str) {
        let dir = base.join(id.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("output"), content).unwrap();
    }

    fn args(list: PathBuf) -> EnergiesArgs {
        EnergiesArgs {
            list,
            base_dir: None,
            output_name: "output".to_string(),
            output: None,
            csv: None,
        }
    }

    #[test]
    fn test_read_run_list() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let list = dir.path().join("dirs.txt");
        fs::write(&list, "# structures\n3\n1 2\n\n10\n").unwrap();
        assert_eq!(read_run_list(&list).unwrap(), vec![3, 1, 2, 10]);

        fs::write(&list, "1\nfoo\n").unwrap();
        assert!(matches!(
            read_run_list(&list),
            Err(AimsError::MalformedLine { line: 2, .. })
        ));
    }

    #[test]
    fn test_execute_in_input_order() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_run(dir.path(), 2, &aims_output(&[-50.0], 0, true));
        write_run(dir.path(), 1, &aims_output(&[-100.0, -100.5, -100.75], 3, true));
        let list = dir.path().join("dirs.txt");
        fs::write(&list, "2\n1\n").unwrap();

        execute(args(list)).unwrap();

        let table = fs::read_to_string(dir.path().join(dat::ENERGIES_FILE)).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "# Structure no., Relax. steps, E_initial, E_final");
        assert_eq!(lines[1], "2 0 -50.0 -50.0");
        assert_eq!(lines[2], "1 3 -100.0 -100.75");
    }

    #[test]
    fn test_incomplete_run_aborts_without_output() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_run(dir.path(), 1, &aims_output(&[-10.0], 1, true));
        write_run(dir.path(), 2, &aims_output(&[-20.0], 1, false));
        write_run(dir.path(), 3, &aims_output(&[-30.0], 1, true));
        let list = dir.path().join("dirs.txt");
        fs::write(&list, "1\n2\n3\n").unwrap();

        let err = execute(args(list)).unwrap_err();
        assert!(matches!(err, AimsError::IncompleteRun { run: 2, .. }));
        assert!(!dir.path().join(dat::ENERGIES_FILE).exists());
    }

    #[test]
    fn test_missing_run_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = collect_runs(dir.path(), "output", &[42]).unwrap_err();
        assert!(matches!(err, AimsError::FileReadError { .. }));
    }

    #[test]
    fn test_empty_list() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let list = dir.path().join("dirs.txt");
        fs::write(&list, "# nothing yet\n").unwrap();
        assert!(matches!(
            execute(args(list)),
            Err(AimsError::InvalidArgument(_))
        ));
    }
}
