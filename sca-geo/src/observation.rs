use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One dated satellite measurement over the area of interest.
///
/// Areas are in square meters. The service is expected to keep
/// `snow_area_m2` within `[0, total_area_m2]`, but upstream data can violate
/// that; nothing here enforces it, and the derived helpers stay total on
/// degenerate inputs so display code cannot crash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnowObservation {
    pub observation_date: NaiveDate,
    pub snow_area_m2: f64,
    pub total_area_m2: f64,
    /// Area classified as vegetation, when the service computed NDVI.
    pub vegetation_area_m2: Option<f64>,
    /// Mean NDVI over the area, when available.
    pub mean_ndvi: Option<f64>,
    /// Identifier of the source satellite image.
    pub image_id: Option<String>,
    /// Opaque URLs to rendered imagery, handed unmodified to presentation.
    pub rgb_image_url: Option<String>,
    pub snow_mask_image_url: Option<String>,
    pub ndvi_image_url: Option<String>,
}

impl SnowObservation {
    /// Snow-covered share of the total area, or `None` when the total is not
    /// a positive finite number.
    pub fn snow_fraction(&self) -> Option<f64> {
        fraction(self.snow_area_m2, self.total_area_m2)
    }

    /// Vegetation share of the total area, when vegetation was measured.
    pub fn vegetation_fraction(&self) -> Option<f64> {
        fraction(self.vegetation_area_m2?, self.total_area_m2)
    }
}

fn fraction(part: f64, total: f64) -> Option<f64> {
    if part.is_finite() && total.is_finite() && total > 0.0 {
        Some(part / total)
    } else {
        None
    }
}

impl Ord for SnowObservation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.observation_date.cmp(&other.observation_date)
    }
}

impl PartialOrd for SnowObservation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for SnowObservation {}

impl PartialEq for SnowObservation {
    fn eq(&self, other: &Self) -> bool {
        self.observation_date == other.observation_date
    }
}

#[cfg(test)]
mod tests {
    use super::SnowObservation;
    use chrono::NaiveDate;

    fn observation(date: (i32, u32, u32), snow: f64, total: f64) -> SnowObservation {
        SnowObservation {
            observation_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            snow_area_m2: snow,
            total_area_m2: total,
            vegetation_area_m2: None,
            mean_ndvi: None,
            image_id: None,
            rgb_image_url: None,
            snow_mask_image_url: None,
            ndvi_image_url: None,
        }
    }

    #[test]
    fn test_sorts_by_observation_date() {
        let mut observations = vec![
            observation((2020, 7, 15), 100.0, 500.0),
            observation((2020, 1, 15), 300.0, 500.0),
            observation((2020, 4, 15), 200.0, 500.0),
        ];
        observations.sort();
        let dates: Vec<u32> = observations
            .iter()
            .map(|o| chrono::Datelike::month(&o.observation_date))
            .collect();
        assert_eq!(dates, vec![1, 4, 7]);
    }

    #[test]
    fn test_snow_fraction() {
        assert_eq!(observation((2020, 1, 1), 125.0, 500.0).snow_fraction(), Some(0.25));
    }

    #[test]
    fn test_snow_fraction_degenerate_totals() {
        assert_eq!(observation((2020, 1, 1), 125.0, 0.0).snow_fraction(), None);
        assert_eq!(observation((2020, 1, 1), 125.0, -10.0).snow_fraction(), None);
        assert_eq!(observation((2020, 1, 1), 125.0, f64::NAN).snow_fraction(), None);
    }

    #[test]
    fn test_snow_fraction_above_one_is_passed_through() {
        // Upstream can report snow > total; the helper must not clamp or panic.
        assert_eq!(observation((2020, 1, 1), 600.0, 500.0).snow_fraction(), Some(1.2));
    }

    #[test]
    fn test_vegetation_fraction_requires_measurement() {
        let mut obs = observation((2020, 1, 1), 100.0, 500.0);
        assert_eq!(obs.vegetation_fraction(), None);
        obs.vegetation_area_m2 = Some(250.0);
        assert_eq!(obs.vegetation_fraction(), Some(0.5));
    }
}
