//! Owned application state for the analysis workflow.
//!
//! `AppState` bundles the draft polygon, the request session, the result
//! history, and the overlay pick into one struct mutated only through its
//! methods. Hosts hold the state (typically behind a `Mutex`), render from
//! `map_view` and the accessors, and register a listener to learn when to
//! re-render; the core carries no UI framework.

use chrono::Utc;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use sca_api::wire::{AnalysisRequest, AnalysisResponse, ObservationDto};
use sca_geo::error::InvalidGeometry;
use sca_geo::month_range::{MonthRange, YearMonth};
use sca_geo::polygon::{LatLng, Polygon};
use sca_geo::result::{AnalysisResult, ResultId};

use crate::coordinator::{derive_map_view, ImageOverlay, MapView, OverlayKind};
use crate::error::SubmitError;
use crate::session::{SessionController, SessionStatus};
use crate::store::ResultStore;

/// A drawn polygon that has not yet been promoted into a saved result.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftPolygon {
    polygon: Polygon,
    retained: bool,
}

impl DraftPolygon {
    fn fresh(polygon: Polygon) -> DraftPolygon {
        DraftPolygon {
            polygon,
            retained: false,
        }
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// True once the draft survived a failed request and is waiting for a
    /// retry; such a draft no longer blocks drawing a replacement.
    pub fn retained(&self) -> bool {
        self.retained
    }
}

/// Handle for one accepted submission on its way to the transport.
#[derive(Debug)]
pub struct PendingAnalysis {
    pub(crate) epoch: u64,
    pub(crate) polygon: Polygon,
    pub(crate) range: MonthRange,
    pub request: AnalysisRequest,
    pub cancel: CancellationToken,
}

/// Token returned by `subscribe`, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn() + Send>;

/// Shared application state for snow analysis hosts.
pub struct AppState {
    session: SessionController,
    store: ResultStore,
    draft: Option<DraftPolygon>,
    overlay: Option<ImageOverlay>,
    next_result_id: u64,
    next_listener_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl AppState {
    pub fn new() -> AppState {
        AppState {
            session: SessionController::new(),
            store: ResultStore::new(),
            draft: None,
            overlay: None,
            next_result_id: 1,
            next_listener_id: 1,
            listeners: Vec::new(),
        }
    }

    /// Register a change listener, called after every state mutation.
    ///
    /// Listeners run while the caller's borrow of the state is still held, so
    /// they must not call back into `AppState` synchronously; signal a
    /// channel or schedule a re-render instead.
    pub fn subscribe(&mut self, listener: impl Fn() + Send + 'static) -> SubscriptionId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id.0);
    }

    fn changed(&self) {
        for (_, listener) in &self.listeners {
            listener();
        }
    }

    // --- read side -------------------------------------------------------

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn session_status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.session.last_error()
    }

    pub fn draft(&self) -> Option<&DraftPolygon> {
        self.draft.as_ref()
    }

    /// Derive what the map should display right now.
    pub fn map_view(&self) -> MapView {
        derive_map_view(
            self.draft.as_ref(),
            &self.session,
            &self.store,
            self.overlay.as_ref(),
        )
    }

    // --- input events ----------------------------------------------------

    /// The drawing collaborator finished a polygon.
    ///
    /// This is the only event that can populate the draft. The new draft
    /// becomes the single visual focus: any result selection and overlay pick
    /// are cleared. Returns `Ok(false)` when drawing is currently disabled
    /// (the collaborator is expected to prevent this; a stray event is
    /// dropped, not applied).
    pub fn polygon_drawn(&mut self, points: Vec<LatLng>) -> Result<bool, InvalidGeometry> {
        if !self.map_view().drawing_enabled {
            warn!("Ignoring drawn polygon while drawing is disabled");
            return Ok(false);
        }
        let polygon = Polygon::new(points)?;
        self.draft = Some(DraftPolygon::fresh(polygon));
        self.store.clear_active();
        self.overlay = None;
        self.changed();
        Ok(true)
    }

    /// Discard the draft and any retained error; drawing is enabled again.
    /// The result history and its selection are untouched.
    pub fn reset(&mut self) {
        self.draft = None;
        self.overlay = None;
        self.session.reset();
        self.changed();
    }

    /// Abort the in-flight request, if any. Clears the draft and re-enables
    /// drawing; a safe no-op when nothing is pending.
    pub fn cancel_request(&mut self) {
        if self.session.cancel() {
            self.draft = None;
            self.changed();
        }
    }

    /// Focus a past result. Clears the overlay pick and drops the draft
    /// reference so the map shows exactly one polygon; an in-flight request
    /// keeps its own copy of the geometry and is not affected.
    pub fn select_result(&mut self, id: ResultId) {
        self.store.select(id);
        self.overlay = None;
        self.draft = None;
        self.changed();
    }

    /// Focus the next (older) result, cyclically.
    pub fn next_result(&mut self) {
        self.store.next();
        self.overlay = None;
        self.draft = None;
        self.changed();
    }

    /// Focus the previous (newer) result, cyclically.
    pub fn previous_result(&mut self) {
        self.store.previous();
        self.overlay = None;
        self.draft = None;
        self.changed();
    }

    /// Display one of an observation's image URLs over the map, pinned to
    /// the bounding box of the current focus polygon. Returns false when
    /// there is no focus polygon to pin it to.
    pub fn pick_overlay(&mut self, url: impl Into<String>, kind: OverlayKind) -> bool {
        let view = self.map_view();
        let Some(polygon) = view.polygon else {
            warn!("Ignoring overlay pick with no focus polygon");
            return false;
        };
        self.overlay = Some(ImageOverlay {
            url: url.into(),
            kind,
            bounds: polygon.bounds(),
        });
        self.changed();
        true
    }

    pub fn clear_overlay(&mut self) {
        self.overlay = None;
        self.changed();
    }

    // --- submit flow ------------------------------------------------------

    /// Validate and open a submission for the current draft polygon.
    ///
    /// Fails fast, before any network activity, with `NoPolygonSelected`,
    /// `InvalidDateRange`, or `SessionBusy`. On success the session is
    /// Pending and the returned handle carries the request body and the
    /// cancellation token for the transport.
    pub fn begin_submit(
        &mut self,
        start: YearMonth,
        end: YearMonth,
    ) -> Result<PendingAnalysis, SubmitError> {
        let draft = self.draft.as_ref().ok_or(SubmitError::NoPolygonSelected)?;
        let polygon = draft.polygon().clone();
        let range = MonthRange::new(start, end)?;
        let (epoch, cancel) = self.session.begin()?;
        let request = AnalysisRequest::new(&polygon, &range);
        self.changed();
        Ok(PendingAnalysis {
            epoch,
            polygon,
            range,
            request,
            cancel,
        })
    }

    /// Resolve a submission with the service's response.
    ///
    /// Builds the immutable result (stamping the capture time locally),
    /// prepends it to the history, makes it active, and clears the draft.
    /// Returns `None` when the session was cancelled or superseded in the
    /// meantime; the response is discarded and the store is untouched.
    pub fn apply_success(
        &mut self,
        pending: &PendingAnalysis,
        response: AnalysisResponse,
    ) -> Option<ResultId> {
        if !self.session.finish_success(pending.epoch) {
            info!("Discarding analysis response from a cancelled or superseded session");
            return None;
        }
        let now = Utc::now();
        let id = ResultId::new(self.next_result_id);
        self.next_result_id += 1;
        let observations = response
            .results
            .into_iter()
            .map(ObservationDto::into_observation)
            .collect();
        let sample = response.permanent_snow.into_sample(now);
        let result = AnalysisResult::new(
            id,
            now,
            pending.polygon.clone(),
            observations,
            sample,
            pending.range,
        );
        self.store.append(result);
        self.draft = None;
        self.overlay = None;
        self.changed();
        Some(id)
    }

    /// Resolve a submission as failed. The draft is retained for a retry and
    /// drawing is re-enabled; the message is kept for display until the next
    /// success or reset.
    pub fn apply_failure(&mut self, pending: &PendingAnalysis, message: String) -> bool {
        if !self.session.finish_failure(pending.epoch, message) {
            return false;
        }
        if let Some(draft) = &mut self.draft {
            draft.retained = true;
        }
        self.changed();
        true
    }

    /// Resolve a submission whose transport reported cancellation. The usual
    /// path is `cancel_request`, which already transitioned the session; this
    /// covers the abort surfacing from the network layer first.
    pub fn apply_cancelled(&mut self, pending: &PendingAnalysis) {
        if self.session.finish_cancelled(pending.epoch) {
            self.draft = None;
            self.changed();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
