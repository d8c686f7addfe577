//! # zcoord 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/zcoord.rs`

use clap::Args;
use std::path::PathBuf;

/// zcoord 子命令参数
#[derive(Args, Debug)]
pub struct ZcoordArgs {
    /// FHI-aims geometry file (geometry.in)
    pub geometry: PathBuf,

    /// Species that make up the adsorbed molecule (e.g. C H N)
    pub molecule: Vec<String>,
}
