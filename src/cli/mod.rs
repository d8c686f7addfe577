//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `mulliken`: Mulliken 电荷分析
//! - `energies`: 多目录弛豫能量汇总
//! - `dos`: 元素投影 DOS 求和
//! - `zcoord`: z 坐标 / 层高度分析
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: mulliken, energies, dos, zcoord

pub mod dos;
pub mod energies;
pub mod mulliken;
pub mod zcoord;

use clap::{Parser, Subcommand};

/// aimsutil - FHI-aims 后处理工具箱
#[derive(Parser)]
#[command(name = "aimsutil")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Post-processing toolkit for FHI-aims calculation output", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored terminal output
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Sum Mulliken partial charges per species from an FHI-aims output file
    Mulliken(mulliken::MullikenArgs),

    /// Collect relaxation steps and initial/final energies from numbered run directories
    Energies(energies::EnergiesArgs),

    /// Sum atom-projected DOS files per element
    Dos(dos::DosArgs),

    /// Analyze z-coordinates and layer heights of a geometry.in file
    Zcoord(zcoord::ZcoordArgs),
}
