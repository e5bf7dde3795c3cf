/// Error types for geometry and date-range validation.
use crate::month_range::YearMonth;
use thiserror::Error;

/// A drawn polygon failed structural validation.
///
/// These errors are surfaced as soon as the drawing collaborator hands over a
/// ring of coordinates; a polygon that fails validation is never sent to the
/// analysis service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidGeometry {
    /// Fewer than 3 distinct vertices after collapsing duplicates.
    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    TooFewPoints(usize),

    /// A coordinate outside [-90, 90] latitude / [-180, 180] longitude.
    #[error("coordinate ({lat}, {lng}) is outside the valid latitude/longitude range")]
    CoordinateOutOfRange { lat: f64, lng: f64 },
}

/// A month range failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidDateRange {
    /// A month outside 1-12.
    #[error("month {0} is outside 1-12")]
    MonthOutOfRange(u32),

    /// The end month precedes the start month.
    #[error("range ends ({end}) before it starts ({start})")]
    EndBeforeStart { start: YearMonth, end: YearMonth },

    /// A year-month string that is not in YYYY-MM form.
    #[error("failed to parse {0:?} as a year-month (expected YYYY-MM)")]
    Unparseable(String),
}
