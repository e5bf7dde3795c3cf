//! Wire types for the analysis service contract.
//!
//! One POST carries the drawn geometry and the concrete date window; the
//! response carries the dated observations plus one permanent-snow summary.
//! Image URLs are opaque here and handed unmodified to presentation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use sca_geo::month_range::MonthRange;
use sca_geo::observation::SnowObservation;
use sca_geo::permanent_snow::PermanentSnowSample;
use sca_geo::polygon::Polygon;

/// Date format used for the analysis API request body: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// GeoJSON-style polygon geometry: one ring of `[lon, lat]` positions,
/// explicitly closed (first position repeated last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPolygon {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl GeoJsonPolygon {
    pub fn from_polygon(polygon: &Polygon) -> GeoJsonPolygon {
        let mut ring: Vec<[f64; 2]> = polygon
            .points()
            .iter()
            .map(|p| [p.lng, p.lat])
            .collect();
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        GeoJsonPolygon {
            kind: "Polygon".to_string(),
            coordinates: vec![ring],
        }
    }
}

/// Body of the analysis POST request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub geometry: GeoJsonPolygon,
    pub start_date: String,
    pub end_date: String,
}

impl AnalysisRequest {
    pub fn new(polygon: &Polygon, range: &MonthRange) -> AnalysisRequest {
        let (start, end) = range.request_window();
        AnalysisRequest {
            geometry: GeoJsonPolygon::from_polygon(polygon),
            start_date: start.format(DATE_FORMAT).to_string(),
            end_date: end.format(DATE_FORMAT).to_string(),
        }
    }
}

/// One observation row as the service reports it. `image_date` is the
/// canonical date key; everything beyond the two areas is optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObservationDto {
    pub image_date: NaiveDate,
    pub snow_area_m2: f64,
    pub total_area_m2: f64,
    #[serde(default)]
    pub vegetation_area_m2: Option<f64>,
    #[serde(default)]
    pub mean_ndvi: Option<f64>,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub rgb_url: Option<String>,
    #[serde(default)]
    pub snow_url: Option<String>,
    #[serde(default)]
    pub ndvi_url: Option<String>,
}

impl ObservationDto {
    pub fn into_observation(self) -> SnowObservation {
        SnowObservation {
            observation_date: self.image_date,
            snow_area_m2: self.snow_area_m2,
            total_area_m2: self.total_area_m2,
            vegetation_area_m2: self.vegetation_area_m2,
            mean_ndvi: self.mean_ndvi,
            image_id: self.image_id,
            rgb_image_url: self.rgb_url,
            snow_mask_image_url: self.snow_url,
            ndvi_image_url: self.ndvi_url,
        }
    }
}

/// The permanent-snow summary as the service reports it. Carries no
/// timestamp; the receiver stamps its own capture time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PermanentSnowDto {
    pub area_m2: f64,
    pub min_height_m: f64,
    pub total_area_m2: f64,
    #[serde(default)]
    pub region_name: Option<String>,
}

impl PermanentSnowDto {
    pub fn into_sample(self, captured_at: DateTime<Utc>) -> PermanentSnowSample {
        PermanentSnowSample {
            area_m2: self.area_m2,
            min_height_m: self.min_height_m,
            total_area_m2: self.total_area_m2,
            captured_at,
            region_name: self.region_name,
        }
    }
}

/// Body of a successful analysis response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResponse {
    pub results: Vec<ObservationDto>,
    pub permanent_snow: PermanentSnowDto,
}

/// Best-effort shape of a failing response body.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
