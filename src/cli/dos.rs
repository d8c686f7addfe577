//! # dos 子命令 CLI 定义
//!
//! 按元素对 `atom_projected_dos_<El><NNNN>.dat` 求和
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/dos.rs`

use clap::Args;
use std::path::PathBuf;

/// dos 子命令参数
#[derive(Args, Debug)]
pub struct DosArgs {
    /// Directory with atom-projected DOS files (outputs are written here too)
    pub dir: PathBuf,

    /// Only check that all files share the same shape, not the same energy values
    #[arg(long, default_value_t = false)]
    pub skip_grid_check: bool,

    /// Save a plot of the element-projected DOS (PNG)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Plot width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
