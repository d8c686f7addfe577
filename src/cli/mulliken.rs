//! # mulliken 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/mulliken.rs`

use clap::Args;
use std::path::PathBuf;

/// mulliken 子命令参数
#[derive(Args, Debug)]
pub struct MullikenArgs {
    /// FHI-aims output file (stdout of the calculation)
    pub input: PathBuf,

    /// Per-atom charge table [default: <input dir>/mulliken_partial_charges.dat]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also save the per-species summary as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
