use std::collections::VecDeque;

use sca_geo::result::{AnalysisResult, ResultId};

/// Ordered history of completed analyses, newest first, with one optional
/// "active" focus.
///
/// The active id is a weak reference: it is resolved by lookup on every read,
/// and an id that is no longer present simply reads as "no active result".
/// Stored results are never mutated; a correction means appending a new
/// result.
pub struct ResultStore {
    results: VecDeque<AnalysisResult>,
    active: Option<ResultId>,
}

impl ResultStore {
    pub fn new() -> ResultStore {
        ResultStore {
            results: VecDeque::new(),
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results in display order, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter()
    }

    pub fn get(&self, id: ResultId) -> Option<&AnalysisResult> {
        self.results.iter().find(|r| r.id() == id)
    }

    /// Prepend a completed result and make it the active one.
    pub fn append(&mut self, result: AnalysisResult) {
        self.active = Some(result.id());
        self.results.push_front(result);
    }

    /// Focus `id` if it is present; an unknown id clears the focus instead of
    /// erroring.
    pub fn select(&mut self, id: ResultId) {
        self.active = if self.get(id).is_some() {
            Some(id)
        } else {
            None
        };
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn active_id(&self) -> Option<ResultId> {
        self.active
    }

    /// The currently focused result, if its id still resolves.
    pub fn active(&self) -> Option<&AnalysisResult> {
        self.get(self.active?)
    }

    fn active_index(&self) -> Option<usize> {
        let id = self.active?;
        self.results.iter().position(|r| r.id() == id)
    }

    /// Move the focus one entry toward older results, wrapping at the end.
    /// With no current focus the newest entry is selected. No-op when empty.
    pub fn next(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let index = match self.active_index() {
            Some(i) => (i + 1) % self.results.len(),
            None => 0,
        };
        self.active = Some(self.results[index].id());
    }

    /// Move the focus one entry toward newer results, wrapping at the front.
    /// With no current focus the oldest entry is selected. No-op when empty.
    pub fn previous(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let len = self.results.len();
        let index = match self.active_index() {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.active = Some(self.results[index].id());
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        ResultStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ResultStore;
    use chrono::Utc;
    use sca_geo::month_range::{MonthRange, YearMonth};
    use sca_geo::permanent_snow::PermanentSnowSample;
    use sca_geo::polygon::{LatLng, Polygon};
    use sca_geo::result::{AnalysisResult, ResultId};

    fn result(id: u64) -> AnalysisResult {
        let polygon = Polygon::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 0.0),
            LatLng::new(1.0, 1.0),
        ])
        .unwrap();
        let now = Utc::now();
        AnalysisResult::new(
            ResultId::new(id),
            now,
            polygon,
            Vec::new(),
            PermanentSnowSample {
                area_m2: 0.0,
                min_height_m: 0.0,
                total_area_m2: 0.0,
                captured_at: now,
                region_name: None,
            },
            MonthRange::new(YearMonth::new(2020, 1), YearMonth::new(2020, 1)).unwrap(),
        )
    }

    #[test]
    fn test_append_prepends_and_activates() {
        let mut store = ResultStore::new();
        store.append(result(1));
        store.append(result(2));
        let order: Vec<u64> = store.iter().map(|r| r.id().raw()).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(store.active_id(), Some(ResultId::new(2)));
    }

    #[test]
    fn test_next_cycles_and_wraps() {
        let mut store = ResultStore::new();
        store.append(result(1));
        store.append(result(2));
        // Active is the newest (2); next moves to the older entry, then wraps.
        store.next();
        assert_eq!(store.active_id(), Some(ResultId::new(1)));
        store.next();
        assert_eq!(store.active_id(), Some(ResultId::new(2)));
    }

    #[test]
    fn test_previous_wraps_to_oldest() {
        let mut store = ResultStore::new();
        store.append(result(1));
        store.append(result(2));
        store.previous();
        assert_eq!(store.active_id(), Some(ResultId::new(1)));
        store.previous();
        assert_eq!(store.active_id(), Some(ResultId::new(2)));
    }

    #[test]
    fn test_navigation_on_empty_store_is_noop() {
        let mut store = ResultStore::new();
        store.next();
        store.previous();
        assert_eq!(store.active_id(), None);
    }

    #[test]
    fn test_navigation_with_no_focus_picks_an_end() {
        let mut store = ResultStore::new();
        store.append(result(1));
        store.append(result(2));
        store.clear_active();
        store.next();
        assert_eq!(store.active_id(), Some(ResultId::new(2)));
        store.clear_active();
        store.previous();
        assert_eq!(store.active_id(), Some(ResultId::new(1)));
    }

    #[test]
    fn test_select_unknown_id_clears_focus_without_error() {
        let mut store = ResultStore::new();
        store.append(result(1));
        store.select(ResultId::new(99));
        assert_eq!(store.active_id(), None);
        assert!(store.active().is_none());

        store.select(ResultId::new(1));
        assert_eq!(store.active_id(), Some(ResultId::new(1)));
    }
}
