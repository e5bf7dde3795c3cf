//! Pure derivation of what the map should display.
//!
//! Nothing else in the system computes the map's polygon, overlay, or
//! drawing permission; hosts call `derive_map_view` (usually via
//! `AppState::map_view`) after every state change.

use serde::Serialize;

use sca_geo::polygon::{BoundingBox, Polygon};

use crate::session::SessionController;
use crate::state::DraftPolygon;
use crate::store::ResultStore;

/// Which rendered imagery layer the user picked for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverlayKind {
    Rgb,
    SnowMask,
    Ndvi,
}

/// An image overlay pinned to the bounding box of the polygon that was the
/// visual focus when the user picked it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOverlay {
    pub url: String,
    pub kind: OverlayKind,
    pub bounds: BoundingBox,
}

/// What the map should display right now: at most one polygon as the primary
/// subject, at most one image overlay, and whether drawing a new polygon is
/// currently permitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub polygon: Option<Polygon>,
    pub overlay: Option<ImageOverlay>,
    pub drawing_enabled: bool,
}

/// Compute the map view from the owned state.
///
/// The draft takes precedence over the active result's saved polygon;
/// `AppState` keeps the two mutually exclusive (drawing clears the selection,
/// selecting drops the draft), so the precedence only matters transiently.
/// Drawing is permitted unless a request is in flight or a fresh draft is
/// still waiting to be submitted; a draft retained after a failure does not
/// block redrawing.
pub fn derive_map_view(
    draft: Option<&DraftPolygon>,
    session: &SessionController,
    store: &ResultStore,
    overlay: Option<&ImageOverlay>,
) -> MapView {
    let polygon = draft
        .map(|d| d.polygon().clone())
        .or_else(|| store.active().map(|r| r.polygon().clone()));
    let drawing_enabled = !session.is_pending() && draft.map_or(true, DraftPolygon::retained);
    MapView {
        polygon,
        overlay: overlay.cloned(),
        drawing_enabled,
    }
}
