//! # 统一错误处理模块
//!
//! 定义 aimsutil 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// aimsutil 统一错误类型
#[derive(Error, Debug)]
pub enum AimsError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 报告解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Anchor '{anchor}' not found in {path}")]
    AnchorNotFound { anchor: String, path: String },

    #[error("Malformed line {line} in {path}\nReason: {reason}")]
    MalformedLine {
        path: String,
        line: usize,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 数据一致性错误
    // ─────────────────────────────────────────────────────────────
    #[error("Calculation {run} not completed! Check end of output file: {path}")]
    IncompleteRun { run: i64, path: String },

    #[error("Given molecule species '{species}' not found in geometry")]
    UnknownSpecies { species: String },

    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("No atom-projected DOS files found for element '{element}'")]
    NoFilesForElement { element: String },

    #[error("Energy grid mismatch in {path}\nReason: {reason}")]
    GridMismatch { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, AimsError>;
