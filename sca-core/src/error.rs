/// Error types for the submit flow.
use sca_geo::error::InvalidDateRange;
use thiserror::Error;

/// Everything that can stop an analysis submission, locally or at the
/// network stage.
///
/// The first three variants resolve synchronously before any network call;
/// only `RequestFailed` and `RequestCancelled` come out of a session that
/// actually went Pending.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Submit attempted with no draft polygon on the map.
    #[error("no polygon selected")]
    NoPolygonSelected,

    /// Submit attempted while another request is in flight.
    #[error("an analysis request is already in flight")]
    SessionBusy,

    /// The requested month window failed validation.
    #[error(transparent)]
    InvalidDateRange(#[from] InvalidDateRange),

    /// The service or transport failed; the message is display-ready.
    #[error("analysis request failed: {0}")]
    RequestFailed(String),

    /// The user aborted the request before it resolved.
    #[error("analysis request cancelled")]
    RequestCancelled,
}
