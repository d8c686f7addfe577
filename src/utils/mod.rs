//! # 工具函数模块
//!
//! 提供美化输出、进度条、目录文件收集等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: output, progress, collector

pub mod collector;
pub mod output;
pub mod progress;

use std::path::{Path, PathBuf};

/// 与输入文件位于同一目录下的文件路径
pub fn sibling_path(input: &Path, file_name: &str) -> PathBuf {
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
