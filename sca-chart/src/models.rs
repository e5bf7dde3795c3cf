//! Chart and table model structs for snow cover and vegetation data.
//!
//! All structs derive `Serialize` so a charting host can consume them as
//! JSON without touching the domain types.

use serde::Serialize;

/// One point of the snow-cover time series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnowCoverPoint {
    /// Observation date (YYYY-MM-DD).
    pub date: String,
    /// Snow-covered area in square meters.
    pub snow_area_m2: f64,
    /// Total measured area in square meters.
    pub total_area_m2: f64,
    /// Snow-covered share of the total area, in percent.
    /// `None` when the reported total is zero or not finite.
    pub coverage_percent: Option<f64>,
}

/// One point of the NDVI time series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NdviPoint {
    /// Observation date (YYYY-MM-DD).
    pub date: String,
    /// Mean NDVI over the area, typically in [-1, 1].
    pub mean_ndvi: f64,
}

/// One permanent-snow sample accumulated across the result history.
///
/// Relates the minimum elevation of permanently snow-covered terrain to the
/// area above it; one sample exists per completed analysis.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PermanentSnowPoint {
    /// When the sample was captured (RFC 3339).
    pub captured_at: String,
    /// Minimum elevation of permanent snow in meters.
    pub min_height_m: f64,
    /// Permanently snow-covered area in square meters.
    pub area_m2: f64,
}

/// One formatted row of the observation table. Cells are display-ready
/// strings; values that cannot be computed render as empty cells.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ObservationRow {
    pub date: String,
    pub snow_area_m2: String,
    pub total_area_m2: String,
    pub coverage_percent: String,
    pub mean_ndvi: String,
}
