use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot relating minimum elevation to permanently snow-covered area.
///
/// One sample is produced per completed analysis and accumulated across the
/// result history; samples are never revised. `captured_at` is stamped
/// locally when the response arrives, not supplied by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermanentSnowSample {
    pub area_m2: f64,
    pub min_height_m: f64,
    pub total_area_m2: f64,
    pub captured_at: DateTime<Utc>,
    pub region_name: Option<String>,
}
