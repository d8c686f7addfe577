//! # aimsutil - FHI-aims 后处理工具箱
//!
//! 把几段零散的后处理脚本统一成单一可执行文件。
//!
//! ## 子命令
//! - `mulliken` - Mulliken 部分电荷按物种求和
//! - `energies` - 多个弛豫计算的步数与初末能量汇总
//! - `dos`      - 原子投影 DOS 按元素求和
//! - `zcoord`   - z 坐标与层间距分析
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (锚点扫描与格式解析)
//!   │     ├── models/    (数据模型与聚合)
//!   │     └── export/    (.dat / CSV / PNG 输出)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod export;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
