//! # energies 子命令 CLI 定义
//!
//! 从多个编号目录的 aims 输出中收集弛豫步数与初末能量
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/energies.rs`

use clap::Args;
use std::path::PathBuf;

/// energies 子命令参数
#[derive(Args, Debug)]
pub struct EnergiesArgs {
    /// File listing run directory numbers (one per line)
    pub list: PathBuf,

    /// Directory containing the numbered run directories [default: directory of the list file]
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Name of the FHI-aims output file inside each run directory
    #[arg(long, env = "AIMSUTIL_OUTPUT_NAME", default_value = "output")]
    pub output_name: String,

    /// Energy table [default: <base dir>/energies_from_aims_output.dat]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also save the table (with energy change) as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
