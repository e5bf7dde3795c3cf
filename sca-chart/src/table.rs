//! Observation table rows and CSV import/export.
//!
//! The CSV format matches the table: `date,snow_area_m2,total_area_m2,
//! coverage_percent,mean_ndvi` with empty cells for values that could not be
//! computed.

use log::warn;
use sca_geo::result::AnalysisResult;

use crate::models::{ObservationRow, SnowCoverPoint};

/// Header row of the observation CSV export.
pub const CSV_HEADER: &str = "date,snow_area_m2,total_area_m2,coverage_percent,mean_ndvi";

/// Display-ready table rows for one result, oldest observation first.
/// Degenerate data (zero or non-finite totals) renders as empty cells.
pub fn observation_rows(result: &AnalysisResult) -> Vec<ObservationRow> {
    result
        .observations()
        .iter()
        .map(|obs| ObservationRow {
            date: obs.observation_date.format(crate::series::DATE_FORMAT).to_string(),
            snow_area_m2: format!("{:.1}", obs.snow_area_m2),
            total_area_m2: format!("{:.1}", obs.total_area_m2),
            coverage_percent: obs
                .snow_fraction()
                .map_or(String::new(), |f| format!("{:.1}", f * 100.0)),
            mean_ndvi: obs
                .mean_ndvi
                .map_or(String::new(), |v| format!("{:.3}", v)),
        })
        .collect()
}

/// Render the observation table as CSV text.
pub fn observations_csv(result: &AnalysisResult) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];
    for row in observation_rows(result) {
        lines.push(format!(
            "{},{},{},{},{}",
            row.date, row.snow_area_m2, row.total_area_m2, row.coverage_percent, row.mean_ndvi
        ));
    }
    lines.join("\n")
}

/// Parse a previously exported observation CSV back into snow-cover points.
/// Rows that fail to parse are skipped.
pub fn parse_snow_cover_csv(csv_object: &str) -> Vec<SnowCoverPoint> {
    let mut points = Vec::new();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_object.as_bytes());
    for row in rdr.records() {
        let record = match row {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping malformed CSV row: {}", e);
                continue;
            }
        };
        let date = match record.get(0) {
            Some(d) if !d.trim().is_empty() => d.trim().to_string(),
            _ => continue,
        };
        let snow_area_m2 = record.get(1).and_then(|s| s.trim().parse::<f64>().ok());
        let total_area_m2 = record.get(2).and_then(|s| s.trim().parse::<f64>().ok());
        let coverage_percent = record.get(3).and_then(|s| s.trim().parse::<f64>().ok());
        if let (Some(snow_area_m2), Some(total_area_m2)) = (snow_area_m2, total_area_m2) {
            points.push(SnowCoverPoint {
                date,
                snow_area_m2,
                total_area_m2,
                coverage_percent,
            });
        }
    }
    points
}
