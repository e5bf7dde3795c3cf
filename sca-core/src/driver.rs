//! Async glue between the owned state and a transport backend.

use std::sync::{Mutex, MutexGuard};

use sca_api::client::AnalysisBackend;
use sca_api::error::ApiError;
use sca_geo::month_range::YearMonth;
use sca_geo::result::ResultId;

use crate::error::SubmitError;
use crate::state::AppState;

/// Submit the current draft polygon over `backend` and drive the session to
/// its terminal outcome.
///
/// Local validation errors (`NoPolygonSelected`, `InvalidDateRange`,
/// `SessionBusy`) resolve before any network activity and leave the session
/// untouched. Exactly one network call is issued per accepted submit. The
/// state lock is released while the call is in flight, so a concurrent
/// `cancel_request` takes effect immediately; an outcome arriving after
/// cancellation is discarded by the state's epoch check.
pub async fn run_analysis<B: AnalysisBackend + ?Sized>(
    state: &Mutex<AppState>,
    backend: &B,
    start: YearMonth,
    end: YearMonth,
) -> Result<ResultId, SubmitError> {
    let pending = lock(state).begin_submit(start, end)?;
    let outcome = backend.analyze(&pending.request, pending.cancel.clone()).await;
    let mut state = lock(state);
    match outcome {
        Ok(response) => state
            .apply_success(&pending, response)
            .ok_or(SubmitError::RequestCancelled),
        Err(ApiError::Cancelled) => {
            state.apply_cancelled(&pending);
            Err(SubmitError::RequestCancelled)
        }
        Err(error) => {
            let message = error.user_message();
            state.apply_failure(&pending, message.clone());
            Err(SubmitError::RequestFailed(message))
        }
    }
}

fn lock(state: &Mutex<AppState>) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
