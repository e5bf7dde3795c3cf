//! Pure builders from analysis results to chart series.

use sca_geo::result::AnalysisResult;

use crate::models::{NdviPoint, PermanentSnowPoint, SnowCoverPoint};

/// Date format used for chart axes and exports: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Snow-cover series for one result, oldest observation first.
pub fn snow_cover_series(result: &AnalysisResult) -> Vec<SnowCoverPoint> {
    result
        .observations()
        .iter()
        .map(|obs| SnowCoverPoint {
            date: obs.observation_date.format(DATE_FORMAT).to_string(),
            snow_area_m2: obs.snow_area_m2,
            total_area_m2: obs.total_area_m2,
            coverage_percent: obs.snow_fraction().map(|f| f * 100.0),
        })
        .collect()
}

/// NDVI series for one result; observations without an NDVI value are
/// skipped rather than plotted as zero.
pub fn ndvi_series(result: &AnalysisResult) -> Vec<NdviPoint> {
    result
        .observations()
        .iter()
        .filter_map(|obs| {
            obs.mean_ndvi.map(|mean_ndvi| NdviPoint {
                date: obs.observation_date.format(DATE_FORMAT).to_string(),
                mean_ndvi,
            })
        })
        .collect()
}

/// Permanent-snow samples accumulated across the whole history, oldest
/// capture first.
pub fn permanent_snow_series<'a>(
    results: impl IntoIterator<Item = &'a AnalysisResult>,
) -> Vec<PermanentSnowPoint> {
    let mut samples: Vec<(chrono::DateTime<chrono::Utc>, PermanentSnowPoint)> = results
        .into_iter()
        .map(|result| {
            let sample = result.permanent_snow();
            (
                sample.captured_at,
                PermanentSnowPoint {
                    captured_at: sample.captured_at.to_rfc3339(),
                    min_height_m: sample.min_height_m,
                    area_m2: sample.area_m2,
                },
            )
        })
        .collect();
    samples.sort_by_key(|(captured_at, _)| *captured_at);
    samples.into_iter().map(|(_, point)| point).collect()
}
