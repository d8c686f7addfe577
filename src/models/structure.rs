//! # 几何结构数据模型
//!
//! 对应 FHI-aims `geometry.in` 中的 `lattice_vector` 与 `atom`/`atom_frac` 行。
//!
//! ## 依赖关系
//! - 被 `parsers/geometry.rs` 构建
//! - 被 `models/layers.rs` 使用

/// 坐标类型，由第一个原子行的关键字决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateMode {
    /// `atom`: 笛卡尔坐标 (Å)
    Cartesian,
    /// `atom_frac`: 分数坐标
    Fractional,
}

impl std::fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateMode::Cartesian => write!(f, "cartesian"),
            CoordinateMode::Fractional => write!(f, "fractional"),
        }
    }
}

/// 晶格
#[derive(Debug, Clone)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// 从晶格向量矩阵创建
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 盒子 z 方向高度，取第三个晶格向量的 z 分量（假设正交晶格）
    pub fn z_extent(&self) -> f64 {
        self.matrix[2][2]
    }
}

/// 原子信息
#[derive(Debug, Clone)]
pub struct Atom {
    /// 物种标签
    pub species: String,

    /// 文件中给出的坐标 [x, y, z]
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(species: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            species: species.into(),
            position,
        }
    }
}

/// geometry.in 结构
#[derive(Debug, Clone)]
pub struct Geometry {
    /// 来源文件名
    pub name: String,

    /// 晶格（非周期体系为 None）
    pub lattice: Option<Lattice>,

    /// 原子列表，保持文件顺序
    pub atoms: Vec<Atom>,

    /// 坐标类型
    pub mode: CoordinateMode,
}

impl Geometry {
    /// 各原子的绝对 z 坐标，分数坐标按盒子高度换算
    ///
    /// 分数坐标但没有晶格时返回 `None`。
    pub fn absolute_z(&self) -> Option<Vec<f64>> {
        let scale = match self.mode {
            CoordinateMode::Cartesian => 1.0,
            CoordinateMode::Fractional => self.lattice.as_ref()?.z_extent(),
        };
        Some(self.atoms.iter().map(|a| a.position[2] * scale).collect())
    }

    /// 按首次出现顺序排列的物种
    pub fn species(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for atom in &self.atoms {
            if !seen.contains(&atom.species) {
                seen.push(atom.species.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab(mode: CoordinateMode) -> Geometry {
        Geometry {
            name: "slab".to_string(),
            lattice: Some(Lattice::from_vectors([
                [3.0, 0.0, 0.0],
                [0.0, 3.0, 0.0],
                [0.0, 0.0, 20.0],
            ])),
            atoms: vec![
                Atom::new("Au", [0.0, 0.0, 0.5]),
                Atom::new("N", [0.0, 0.0, 0.25]),
                Atom::new("Au", [0.0, 0.0, 0.0]),
            ],
            mode,
        }
    }

    #[test]
    fn test_fractional_z_scaled_by_box_height() {
        let z = slab(CoordinateMode::Fractional).absolute_z().unwrap();
        assert_eq!(z[0], 0.5 * 20.0);
        assert_eq!(z[1], 5.0);
        assert_eq!(z[2], 0.0);
    }

    #[test]
    fn test_cartesian_z_unchanged() {
        let z = slab(CoordinateMode::Cartesian).absolute_z().unwrap();
        assert_eq!(z, vec![0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_fractional_without_lattice() {
        let mut g = slab(CoordinateMode::Fractional);
        g.lattice = None;
        assert!(g.absolute_z().is_none());
    }

    #[test]
    fn test_species_first_seen_order() {
        assert_eq!(slab(CoordinateMode::Cartesian).species(), vec!["Au", "N"]);
    }
}
