//! # 态密度曲线数据模型
//!
//! 一条 DOS 曲线是共享能量网格的若干行 (energy, values...)。
//! 多条曲线求和时不做插值，要求网格完全一致。
//!
//! ## 依赖关系
//! - 被 `parsers/dos_table.rs` 构建
//! - 被 `commands/dos.rs`, `export/` 使用

/// 能量网格容差 (eV)
pub const ENERGY_TOLERANCE: f64 = 1e-6;

/// DOS 曲线：`energies[i]` 对应 `values[i]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DosCurve {
    pub energies: Vec<f64>,
    pub values: Vec<Vec<f64>>,
}

impl DosCurve {
    pub fn new(energies: Vec<f64>, values: Vec<Vec<f64>>) -> Self {
        DosCurve { energies, values }
    }

    pub fn n_rows(&self) -> usize {
        self.energies.len()
    }

    /// 每行数值列数（不含能量列）
    pub fn n_values(&self) -> usize {
        self.values.first().map(|r| r.len()).unwrap_or(0)
    }

    /// 检查行数与列数是否一致
    pub fn check_shape(&self, other: &DosCurve) -> std::result::Result<(), String> {
        if self.n_rows() != other.n_rows() {
            return Err(format!(
                "expected {} rows, found {}",
                self.n_rows(),
                other.n_rows()
            ));
        }
        if self.n_values() != other.n_values() {
            return Err(format!(
                "expected {} value columns, found {}",
                self.n_values(),
                other.n_values()
            ));
        }
        Ok(())
    }

    /// 检查能量列是否在容差内一致
    pub fn check_grid(&self, other: &DosCurve) -> std::result::Result<(), String> {
        self.check_shape(other)?;
        for (row, (a, b)) in self.energies.iter().zip(&other.energies).enumerate() {
            if (a - b).abs() > ENERGY_TOLERANCE {
                return Err(format!(
                    "energy {:.8} at row {} differs from {:.8}",
                    b,
                    row + 1,
                    a
                ));
            }
        }
        Ok(())
    }

    /// 逐元素累加 `other` 的数值列，能量列保持不变
    pub fn accumulate(&mut self, other: &DosCurve) -> std::result::Result<(), String> {
        self.check_shape(other)?;
        for (row, other_row) in self.values.iter_mut().zip(&other.values) {
            for (v, o) in row.iter_mut().zip(other_row) {
                *v += o;
            }
        }
        Ok(())
    }

    /// 只保留第一列数值（总 DOS）
    pub fn total_column(&self) -> DosCurve {
        DosCurve {
            energies: self.energies.clone(),
            values: self
                .values
                .iter()
                .map(|r| r.first().copied().into_iter().collect())
                .collect(),
        }
    }

    /// (energy, 第 `col` 列) 点列，用于绘图
    pub fn series(&self, col: usize) -> Vec<(f64, f64)> {
        self.energies
            .iter()
            .zip(&self.values)
            .filter_map(|(e, r)| r.get(col).map(|v| (*e, *v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(rows: &[[f64; 3]]) -> DosCurve {
        DosCurve::new(
            rows.iter().map(|r| r[0]).collect(),
            rows.iter().map(|r| vec![r[1], r[2]]).collect(),
        )
    }

    #[test]
    fn test_accumulate_sums_each_cell() {
        let a = curve(&[[-1.0, 1.0, 2.0], [0.0, 3.0, 4.0]]);
        let b = curve(&[[-1.0, 0.5, 0.25], [0.0, 1.5, 2.5]]);

        let mut sum = a.clone();
        sum.accumulate(&b).unwrap();

        assert_eq!(sum.energies, a.energies);
        assert_eq!(sum.values, vec![vec![1.5, 2.25], vec![4.5, 6.5]]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = curve(&[[-1.0, 1.0, 2.0], [0.0, 3.0, 4.0]]);
        let b = curve(&[[-1.0, 1.0, 2.0]]);
        let mut sum = a.clone();
        assert!(sum.accumulate(&b).is_err());
        assert_eq!(sum, a);
    }

    #[test]
    fn test_grid_mismatch() {
        let a = curve(&[[-1.0, 1.0, 2.0], [0.0, 3.0, 4.0]]);
        let b = curve(&[[-1.0, 1.0, 2.0], [0.1, 3.0, 4.0]]);
        assert!(a.check_shape(&b).is_ok());
        assert!(a.check_grid(&b).is_err());
        assert!(a.check_grid(&a.clone()).is_ok());
    }

    #[test]
    fn test_total_column() {
        let a = curve(&[[-1.0, 1.0, 2.0], [0.0, 3.0, 4.0]]);
        let total = a.total_column();
        assert_eq!(total.n_values(), 1);
        assert_eq!(total.series(0), vec![(-1.0, 1.0), (0.0, 3.0)]);
    }
}
