//! # 解析器模块
//!
//! 提供 FHI-aims 文本输出、几何文件与 DOS 数据文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: report, aims_out, geometry, dos_table

pub mod aims_out;
pub mod dos_table;
pub mod geometry;
pub mod report;

pub use report::RawReport;
