//! # 数据导出模块
//!
//! 将提取结果写入固定文件名的 `.dat` 表格、CSV 以及 DOS 图像。
//!
//! ## 子模块
//! - `dat`: 与原始脚本兼容的空白分隔表格
//! - `table`: CSV 汇总导出
//! - `plot`: 元素投影 DOS 曲线图
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/`

pub mod dat;
pub mod plot;
pub mod table;
