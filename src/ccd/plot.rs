//! # CCD 图
//!
//! 使用 `plotters` 绘制基态/激发态相对能量随 dq 的变化。
//! 只绘制 dq 与能量都为数值的点；MISSING 和空值跳过。
//!
//! ## 依赖关系
//! - 被 `commands/ccd.rs` 调用
//! - 使用 `models/ccd.rs` 的 CcdRow

use crate::error::{CcdError, Result};
use crate::models::CcdRow;

use plotters::prelude::*;
use std::path::Path;

/// (dq, E) 点列
pub fn curve_points(rows: &[CcdRow], excited: bool) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|r| {
            let energy = if excited { r.ex } else { r.gs };
            Some((r.dq.value()?, energy.value()?))
        })
        .collect()
}

/// 生成 PNG 格式的 CCD 图
pub fn generate_ccd_plot(rows: &[CcdRow], output_path: &Path, title: &str) -> Result<()> {
    let gs = curve_points(rows, false);
    let ex = curve_points(rows, true);

    if gs.is_empty() && ex.is_empty() {
        return Err(CcdError::Plot("No data to plot".to_string()));
    }

    let all = gs.iter().chain(ex.iter());
    let (x_min, x_max) = all
        .clone()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| {
            (lo.min(*x), hi.max(*x))
        });
    let (y_min, y_max) = all.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
        (lo.min(*y), hi.max(*y))
    });
    let x_margin = ((x_max - x_min) * 0.05).max(0.1);
    let y_margin = ((y_max - y_min) * 0.1).max(0.1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| CcdError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (x_min - x_margin)..(x_max + x_margin),
            (y_min - y_margin)..(y_max + y_margin),
        )
        .map_err(|e| CcdError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("dq (Å·amu^1/2)")
        .y_desc("Energy (eV)")
        .draw()
        .map_err(|e| CcdError::Plot(e.to_string()))?;

    for (points, color, label) in [(&gs, BLUE, "Ground state"), (&ex, RED, "Excited state")] {
        if points.is_empty() {
            continue;
        }

        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(|e| CcdError::Plot(e.to_string()))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });

        chart
            .draw_series(
                points
                    .iter()
                    .map(move |(x, y)| Circle::new((*x, *y), 4, color.filled())),
            )
            .map_err(|e| CcdError::Plot(e.to_string()))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| CcdError::Plot(e.to_string()))?;

    root.present().map_err(|e| CcdError::Plot(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;

    #[test]
    fn test_curve_points_skip_sentinels() {
        let rows = vec![
            CcdRow {
                index: 1,
                dq: Entry::Reference,
                gs: Entry::Value(0.0),
                ex: Entry::Value(2.5),
            },
            CcdRow {
                index: 2,
                dq: Entry::Value(0.8),
                gs: Entry::Value(0.1),
                ex: Entry::Unmatched,
            },
            CcdRow {
                index: 3,
                dq: Entry::Missing,
                gs: Entry::Value(0.3),
                ex: Entry::Value(2.1),
            },
        ];

        assert_eq!(curve_points(&rows, false), vec![(0.0, 0.0), (0.8, 0.1)]);
        assert_eq!(curve_points(&rows, true), vec![(0.0, 2.5)]);
    }

    #[test]
    fn test_plot_without_data_fails() {
        let rows = vec![CcdRow {
            index: 1,
            dq: Entry::Missing,
            gs: Entry::Missing,
            ex: Entry::Missing,
        }];
        let dir = tempfile::tempdir().unwrap();
        assert!(generate_ccd_plot(&rows, &dir.path().join("ccd.png"), "ccd").is_err());
    }
}
