//! # 元素投影 DOS 曲线图
//!
//! 使用 `plotters` 将每个元素的总 DOS 与全部元素之和画在同一张图上。
//!
//! ## 依赖关系
//! - 被 `commands/dos.rs` 调用
//! - 使用 `models/dos.rs`

use crate::error::{AimsError, Result};
use crate::models::DosCurve;

use plotters::prelude::*;
use std::path::Path;

/// 生成 DOS 图（PNG）
pub fn generate_dos_plot(
    elements: &[(String, DosCurve)],
    total: &DosCurve,
    output_path: &Path,
    width: u32,
    height: u32,
) -> Result<()> {
    let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AimsError::Other(e.to_string()))?;

    let total_series = total.series(0);
    if total_series.is_empty() {
        return Err(AimsError::Other("No data to plot".to_string()));
    }

    let x_min = total_series
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::INFINITY, f64::min);
    let x_max = total_series
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_max = total_series
        .iter()
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption("Element-projected DOS", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| AimsError::Other(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Energy (eV)")
        .y_desc("DOS (states/eV)")
        .draw()
        .map_err(|e| AimsError::Other(e.to_string()))?;

    for (i, (element, curve)) in elements.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(curve.series(0), color.stroke_width(2)))
            .map_err(|e| AimsError::Other(e.to_string()))?
            .label(element.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .draw_series(LineSeries::new(total_series, BLACK.stroke_width(2)))
        .map_err(|e| AimsError::Other(e.to_string()))?
        .label("Total")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| AimsError::Other(e.to_string()))?;

    root.present()
        .map_err(|e| AimsError::Other(e.to_string()))?;

    Ok(())
}
