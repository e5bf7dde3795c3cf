use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::month_range::MonthRange;
use crate::observation::SnowObservation;
use crate::permanent_snow::PermanentSnowSample;
use crate::polygon::Polygon;

/// Opaque token identifying one completed analysis within its store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ResultId(u64);

impl ResultId {
    pub fn new(raw: u64) -> ResultId {
        ResultId(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "analysis-{}", self.0)
    }
}

/// The record of one completed analysis: the saved polygon, its observation
/// time series, the permanent-snow sample, and the month window that was
/// requested.
///
/// Created once when a request succeeds and immutable thereafter; every field
/// is reached through `&self` accessors only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    id: ResultId,
    created_at: DateTime<Utc>,
    polygon: Polygon,
    observations: Vec<SnowObservation>,
    permanent_snow: PermanentSnowSample,
    range: MonthRange,
}

impl AnalysisResult {
    pub fn new(
        id: ResultId,
        created_at: DateTime<Utc>,
        polygon: Polygon,
        mut observations: Vec<SnowObservation>,
        permanent_snow: PermanentSnowSample,
        range: MonthRange,
    ) -> AnalysisResult {
        observations.sort();
        AnalysisResult {
            id,
            created_at,
            polygon,
            observations,
            permanent_snow,
            range,
        }
    }

    pub fn id(&self) -> ResultId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Observations ordered by date, oldest first.
    pub fn observations(&self) -> &[SnowObservation] {
        &self.observations
    }

    pub fn permanent_snow(&self) -> &PermanentSnowSample {
        &self.permanent_snow
    }

    pub fn range(&self) -> MonthRange {
        self.range
    }
}
