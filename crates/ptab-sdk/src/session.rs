use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use ptab_diff::{DiffSummary, RowDiff, ViewFilter};
use ptab_types::VersionId;

use crate::compare::{CompareRequest, Comparison};
use crate::error::SdkResult;
use crate::tables::PriceTables;

/// What happened to a comparison once its loads finished.
#[derive(Clone, Debug)]
pub enum CompareOutcome {
    /// The result is now the session's current comparison.
    Applied(Arc<Comparison>),
    /// The selection changed while loading; the result was discarded.
    Superseded,
}

impl CompareOutcome {
    pub fn comparison(&self) -> Option<&Arc<Comparison>> {
        match self {
            Self::Applied(cmp) => Some(cmp),
            Self::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

#[derive(Debug, Default)]
struct SessionState {
    left: Option<VersionId>,
    right: Option<VersionId>,
    current: Option<Arc<Comparison>>,
    filter: ViewFilter,
    include_unchanged: bool,
    /// Bumped on every selection change and every compare started.
    generation: u64,
}

impl SessionState {
    fn invalidate(&mut self) -> u64 {
        self.current = None;
        self.generation += 1;
        self.generation
    }
}

/// Interactive comparison state: two selections, the latest result and
/// the view filter applied to it.
///
/// Only the newest comparison may become current. A result whose
/// selection changed while it was loading is dropped, never shown.
pub struct CompareSession {
    tables: Arc<PriceTables>,
    state: Mutex<SessionState>,
}

impl CompareSession {
    pub fn new(tables: Arc<PriceTables>) -> Self {
        Self {
            tables,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn tables(&self) -> &Arc<PriceTables> {
        &self.tables
    }

    // ---- Selection ----

    /// Select the old version. Clears any current result.
    pub fn select_left(&self, id: Option<VersionId>) {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.left != id {
            state.left = id;
            state.invalidate();
        }
    }

    /// Select the new version. Clears any current result.
    pub fn select_right(&self, id: Option<VersionId>) {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.right != id {
            state.right = id;
            state.invalidate();
        }
    }

    pub fn selections(&self) -> (Option<VersionId>, Option<VersionId>) {
        let state = self.state.lock().expect("lock poisoned");
        (state.left.clone(), state.right.clone())
    }

    pub fn is_same_selection(&self) -> bool {
        let state = self.state.lock().expect("lock poisoned");
        state.left.is_some() && state.left == state.right
    }

    // ---- Comparison ----

    /// Compare the current selections.
    ///
    /// Invalid selections are rejected before anything is loaded. The
    /// previous result is cleared as soon as loading starts.
    pub async fn compare(&self) -> SdkResult<CompareOutcome> {
        let (request, ticket) = {
            let mut state = self.state.lock().expect("lock poisoned");
            let request = CompareRequest::new(state.left.clone(), state.right.clone())?;
            (request, state.invalidate())
        };
        debug!(left = %request.left, right = %request.right, ticket, "comparison started");

        let result = self.tables.compare(&request).await;

        let mut state = self.state.lock().expect("lock poisoned");
        if state.generation != ticket {
            info!(left = %request.left, right = %request.right, "discarding superseded comparison");
            return Ok(CompareOutcome::Superseded);
        }
        let comparison = Arc::new(result?);
        state.current = Some(Arc::clone(&comparison));
        Ok(CompareOutcome::Applied(comparison))
    }

    pub fn current(&self) -> Option<Arc<Comparison>> {
        self.state.lock().expect("lock poisoned").current.clone()
    }

    pub fn summary(&self) -> Option<DiffSummary> {
        self.current().map(|cmp| cmp.summary)
    }

    // ---- View ----

    pub fn set_filter(&self, filter: ViewFilter) {
        self.state.lock().expect("lock poisoned").filter = filter;
    }

    pub fn filter(&self) -> ViewFilter {
        self.state.lock().expect("lock poisoned").filter
    }

    pub fn set_include_unchanged(&self, include_unchanged: bool) {
        self.state.lock().expect("lock poisoned").include_unchanged = include_unchanged;
    }

    /// Rows of the current comparison that pass the view filter.
    pub fn visible_rows(&self) -> Vec<RowDiff> {
        let state = self.state.lock().expect("lock poisoned");
        match &state.current {
            Some(cmp) => cmp
                .visible_rows(state.filter, state.include_unchanged)
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}

impl std::fmt::Debug for CompareSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().expect("lock poisoned");
        f.debug_struct("CompareSession")
            .field("left", &state.left)
            .field("right", &state.right)
            .field("generation", &state.generation)
            .field("has_result", &state.current.is_some())
            .finish()
    }
}
