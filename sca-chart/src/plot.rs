//! PNG chart rendering via plotters.

use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::Path;

use crate::models::SnowCoverPoint;
use crate::series::DATE_FORMAT;

/// Render the snow-cover percent series as a PNG line chart.
///
/// Points without a computable coverage percent are skipped. Fails when no
/// drawable points remain.
pub fn render_snow_chart(path: &Path, title: &str, series: &[SnowCoverPoint]) -> anyhow::Result<()> {
    let mut points: Vec<(NaiveDate, f64)> = series
        .iter()
        .filter_map(|point| {
            let date = NaiveDate::parse_from_str(&point.date, DATE_FORMAT).ok()?;
            let percent = point.coverage_percent?;
            Some((date, percent))
        })
        .collect();
    points.sort_by_key(|(date, _)| *date);
    anyhow::ensure!(!points.is_empty(), "no drawable points in snow cover series");

    let mut x_min = points.first().unwrap().0;
    let mut x_max = points.last().unwrap().0;
    if x_min == x_max {
        // Pad a single-date series so the axis has a non-empty span.
        x_min = x_min.pred_opt().unwrap_or(x_min);
        x_max = x_max.succ_opt().unwrap_or(x_max);
    }
    let y_max = points.iter().fold(100.0f64, |max, (_, v)| max.max(*v));

    let root = BitMapBackend::new(path, (1024, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(x_min..x_max, 0.0..(y_max * 1.05))?;

    chart
        .configure_mesh()
        .y_desc("Snow cover (%)")
        .x_labels(8)
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(
        points
            .iter()
            .map(|(date, value)| Circle::new((*date, *value), 3, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}
