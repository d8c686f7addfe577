//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `models/`, `export/`, `utils/`
//! - 子模块: mulliken, energies, dos, zcoord

pub mod dos;
pub mod energies;
pub mod mulliken;
pub mod zcoord;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Mulliken(args) => mulliken::execute(args),
        Commands::Energies(args) => energies::execute(args),
        Commands::Dos(args) => dos::execute(args),
        Commands::Zcoord(args) => zcoord::execute(args),
    }
}
