//! # 数据模型模块
//!
//! 定义从 FHI-aims 输出中提取的数据模型及其聚合逻辑。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 子模块: charges, relaxation, dos, structure, layers

pub mod charges;
pub mod dos;
pub mod layers;
pub mod relaxation;
pub mod structure;

pub use charges::{AtomCharge, MullikenAnalysis, SpeciesCharge};
pub use dos::DosCurve;
pub use layers::{LayerAnalysis, LayerStats, MoleculeReport, Separation};
pub use relaxation::RelaxationRun;
pub use structure::{Atom, CoordinateMode, Geometry, Lattice};
