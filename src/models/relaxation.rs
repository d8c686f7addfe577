//! # 结构弛豫结果数据模型
//!
//! 存储单个计算目录中提取的弛豫步数与初末能量。
//!
//! ## 依赖关系
//! - 被 `parsers/aims_out.rs` 构建
//! - 被 `commands/energies.rs`, `export/` 使用

/// 一次弛豫计算
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationRun {
    /// 目录编号
    pub run_id: i64,

    /// 弛豫步数
    pub steps: u32,

    /// 第一个 corrected total energy (eV)
    pub initial_energy: f64,

    /// 最后一个 corrected total energy (eV)
    pub final_energy: f64,
}

impl RelaxationRun {
    /// 从按顺序出现的能量序列构建，序列为空时返回 `None`
    pub fn from_energies(run_id: i64, steps: u32, energies: &[f64]) -> Option<Self> {
        let initial_energy = *energies.first()?;
        let final_energy = *energies.last()?;
        Some(RelaxationRun {
            run_id,
            steps,
            initial_energy,
            final_energy,
        })
    }

    /// 弛豫能量变化 E_final - E_initial
    pub fn energy_change(&self) -> f64 {
        self.final_energy - self.initial_energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_energy() {
        let run = RelaxationRun::from_energies(3, 5, &[-10.0, -10.5, -10.7]).unwrap();
        assert_eq!(run.initial_energy, -10.0);
        assert_eq!(run.final_energy, -10.7);
        assert!((run.energy_change() + 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_single_energy() {
        let run = RelaxationRun::from_energies(1, 0, &[-42.0]).unwrap();
        assert_eq!(run.initial_energy, run.final_energy);
        assert_eq!(run.energy_change(), 0.0);
    }

    #[test]
    fn test_no_energies() {
        assert!(RelaxationRun::from_energies(1, 0, &[]).is_none());
    }
}
