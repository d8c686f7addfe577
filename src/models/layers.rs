//! # 层高度分析
//!
//! 按物种统计原子 z 坐标（平均、最小、最大、起伏），
//! 计算层间距，以及可选的分子相对衬底高度。
//!
//! ## 依赖关系
//! - 使用 `models/structure.rs`
//! - 被 `commands/zcoord.rs` 使用

use crate::error::{AimsError, Result};
use crate::models::Geometry;

/// 单个物种（层）的 z 坐标统计
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStats {
    pub species: String,
    pub count: usize,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl LayerStats {
    /// 由一组 z 坐标计算，空集合返回 `None`
    pub fn from_heights(species: &str, z: &[f64]) -> Option<Self> {
        if z.is_empty() {
            return None;
        }
        let sum: f64 = z.iter().sum();
        Some(LayerStats {
            species: species.to_string(),
            count: z.len(),
            avg: sum / z.len() as f64,
            min: z.iter().copied().fold(f64::INFINITY, f64::min),
            max: z.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }

    /// 起伏 (max - min)
    pub fn corrugation(&self) -> f64 {
        self.max - self.min
    }
}

/// 层间距：`upper.avg - lower.avg`
#[derive(Debug, Clone, PartialEq)]
pub struct Separation {
    pub lower: String,
    pub upper: String,
    pub distance: f64,
}

/// 分子高度报告
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeReport {
    /// 组成分子的物种
    pub species: Vec<String>,
    pub atom_count: usize,
    pub top: f64,
    pub bottom: f64,
    pub average: f64,
    /// 最上层衬底物种及分子相对它的高度
    pub above_substrate: Option<(String, f64)>,
    /// 相对每个非分子物种层的高度，按层平均高度升序
    pub heights: Vec<(String, f64)>,
}

impl MoleculeReport {
    /// 分子弯曲 (top - bottom)
    pub fn corrugation(&self) -> f64 {
        self.top - self.bottom
    }
}

/// 整个结构的层分析结果
#[derive(Debug, Clone)]
pub struct LayerAnalysis {
    /// 按物种首次出现顺序
    layers: Vec<LayerStats>,
    /// 各物种的绝对 z 坐标
    heights: Vec<(String, Vec<f64>)>,
}

impl LayerAnalysis {
    pub fn from_geometry(geometry: &Geometry) -> Result<Self> {
        let z = geometry
            .absolute_z()
            .ok_or_else(|| AimsError::AnchorNotFound {
                anchor: "lattice_vector".to_string(),
                path: geometry.name.clone(),
            })?;

        let mut heights: Vec<(String, Vec<f64>)> = geometry
            .species()
            .into_iter()
            .map(|s| (s, Vec::new()))
            .collect();

        for (atom, z) in geometry.atoms.iter().zip(z) {
            if let Some((_, list)) = heights.iter_mut().find(|(s, _)| *s == atom.species) {
                list.push(z);
            }
        }

        let layers = heights
            .iter()
            .filter_map(|(s, z)| LayerStats::from_heights(s, z))
            .collect();

        Ok(LayerAnalysis { layers, heights })
    }

    /// 按平均高度升序（稳定排序）
    pub fn sorted(&self) -> Vec<&LayerStats> {
        let mut sorted: Vec<&LayerStats> = self.layers.iter().collect();
        sorted.sort_by(|a, b| a.avg.total_cmp(&b.avg));
        sorted
    }

    /// 按平均高度降序，等高的物种保持首次出现顺序
    pub fn top_to_bottom(&self) -> Vec<&LayerStats> {
        let mut sorted: Vec<&LayerStats> = self.layers.iter().collect();
        sorted.sort_by(|a, b| b.avg.total_cmp(&a.avg));
        sorted
    }

    /// 所有物种对的层间距，按升序两两组合
    pub fn separations(&self) -> Vec<Separation> {
        let sorted = self.sorted();
        let mut result = Vec::new();
        for (i, lower) in sorted.iter().enumerate() {
            for upper in sorted.iter().skip(i + 1) {
                result.push(Separation {
                    lower: lower.species.clone(),
                    upper: upper.species.clone(),
                    distance: upper.avg - lower.avg,
                });
            }
        }
        result
    }

    /// 以给定物种组成分子，计算其高度信息
    pub fn molecule(&self, species: &[String]) -> Result<MoleculeReport> {
        let mut members: Vec<String> = Vec::new();
        for s in species {
            if !self.heights.iter().any(|(name, _)| name == s) {
                return Err(AimsError::UnknownSpecies { species: s.clone() });
            }
            if !members.contains(s) {
                members.push(s.clone());
            }
        }

        let z: Vec<f64> = self
            .heights
            .iter()
            .filter(|(name, _)| members.contains(name))
            .flat_map(|(_, z)| z.iter().copied())
            .collect();

        let stats = LayerStats::from_heights("molecule", &z).ok_or_else(|| {
            AimsError::InvalidArgument("molecule species list is empty".to_string())
        })?;

        let substrate: Vec<&LayerStats> = self
            .sorted()
            .into_iter()
            .filter(|l| !members.contains(&l.species))
            .collect();

        let above_substrate = substrate
            .last()
            .map(|top| (top.species.clone(), stats.avg - top.avg));

        let heights = substrate
            .iter()
            .map(|l| (l.species.clone(), stats.avg - l.avg))
            .collect();

        Ok(MoleculeReport {
            species: members,
            atom_count: stats.count,
            top: stats.max,
            bottom: stats.min,
            average: stats.avg,
            above_substrate,
            heights,
        })
    }
}
