//! The search session: one in-memory record of the current query, results,
//! and refinement state, mutated only through its own operations.
//!
//! Every submit carries a monotonically increasing generation tag. A call
//! whose tag is no longer current when it resolves is discarded silently,
//! so a slow early response can never overwrite a newer one and a cleared
//! session stays cleared.

use backend::SearchBackend;
use finch_core::{RefineToggle, Scorecard, SearchRequest, SearchResponse, ToggleSet, refine};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};
use uuid::Uuid;

/// What a call to [`SearchSession::submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// The response was applied to the session
  Applied,
  /// The call failed; the session carries a display message
  Failed,
  /// A newer submit (or a clear) won the race; the response was discarded
  Superseded,
  /// The query was empty after trimming; no call was issued
  SkippedEmpty,
}

/// Point-in-time copy of the session state
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
  pub query: String,
  pub result: Option<Arc<SearchResponse>>,
  pub loading: bool,
  pub error: Option<String>,
  pub toggles: ToggleSet,
  /// Increments every time a result is applied; consumers use it to detect
  /// a new arrival even when the payloads compare equal
  pub result_seq: u64,
}

impl SessionSnapshot {
  /// Whether results are currently showable: a non-empty result set and no
  /// load in flight
  pub fn results_visible(&self) -> bool {
    !self.loading && self.result.as_ref().is_some_and(|r| r.has_results())
  }
}

#[derive(Debug, Default)]
struct SessionState {
  query: String,
  result: Option<Arc<SearchResponse>>,
  loading: bool,
  error: Option<String>,
  toggles: ToggleSet,
  generation: u64,
  result_seq: u64,
}

/// Owns the session state and the injected remote-query capability
pub struct SearchSession {
  backend: Arc<dyn SearchBackend>,
  session_id: Option<String>,
  state: Mutex<SessionState>,
}

impl SearchSession {
  /// Create a session with a fresh id stamped on every request
  pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
    Self {
      backend,
      session_id: Some(Uuid::new_v4().to_string()),
      state: Mutex::new(SessionState::default()),
    }
  }

  /// Create a session that sends no session id
  pub fn anonymous(backend: Arc<dyn SearchBackend>) -> Self {
    Self {
      backend,
      session_id: None,
      state: Mutex::new(SessionState::default()),
    }
  }

  pub fn session_id(&self) -> Option<&str> {
    self.session_id.as_deref()
  }

  // The lock is never held across an await. Poisoning only matters if a
  // panic escaped under the lock; recover with whatever state is there.
  fn state(&self) -> MutexGuard<'_, SessionState> {
    self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  pub fn snapshot(&self) -> SessionSnapshot {
    let state = self.state();
    SessionSnapshot {
      query: state.query.clone(),
      result: state.result.clone(),
      loading: state.loading,
      error: state.error.clone(),
      toggles: state.toggles.clone(),
      result_seq: state.result_seq,
    }
  }

  /// Replace the echoed query text without issuing a remote call
  pub fn update_query(&self, text: &str) {
    self.state().query = text.to_string();
  }

  /// Reset result, error, and toggles. Any in-flight call resolves as a
  /// no-op afterwards. The query text is kept for re-submission.
  pub fn clear(&self) {
    let mut state = self.state();
    state.generation += 1;
    state.result = None;
    state.error = None;
    state.loading = false;
    state.toggles.clear();
  }

  /// Run a search for `query` with the current refinement toggles.
  ///
  /// An empty (post-trim) query is a silent no-op: no call, no state
  /// change, no error. Exactly one backend call is issued otherwise.
  pub async fn submit(&self, query: &str) -> SubmitOutcome {
    let trimmed = query.trim();
    if trimmed.is_empty() {
      debug!("ignoring empty query");
      return SubmitOutcome::SkippedEmpty;
    }

    let (generation, request) = {
      let mut state = self.state();
      state.generation += 1;
      state.query = trimmed.to_string();
      state.loading = true;
      state.error = None;
      let payload = refine::compose(&state.toggles);
      let request = SearchRequest {
        query: trimmed.to_string(),
        session_id: self.session_id.clone(),
        refine: (!payload.is_empty()).then_some(payload),
      };
      (state.generation, request)
    };

    debug!(generation, query = %request.query, "submitting search");
    let outcome = self.backend.search(&request).await;

    let mut state = self.state();
    if state.generation != generation {
      debug!(generation, current = state.generation, "discarding superseded response");
      return SubmitOutcome::Superseded;
    }

    state.loading = false;
    match outcome {
      Ok(response) => {
        state.result = Some(Arc::new(response));
        state.result_seq += 1;
        state.error = None;
        SubmitOutcome::Applied
      }
      Err(e) => {
        warn!(error = %e, "search failed");
        state.error = Some(e.display_message());
        SubmitOutcome::Failed
      }
    }
  }

  /// Flip a refinement toggle and, when a query is present, re-run the
  /// search with the recomposed payload
  pub async fn toggle_refine(&self, toggle: RefineToggle) -> SubmitOutcome {
    let query = {
      let mut state = self.state();
      state.toggles.toggle(toggle);
      state.query.clone()
    };
    if query.trim().is_empty() {
      return SubmitOutcome::SkippedEmpty;
    }
    self.submit(&query).await
  }

  /// Fetch the quality scorecard through the same backend
  pub async fn scorecard(&self) -> Result<Scorecard, backend::BackendError> {
    self.backend.scorecard().await
  }
}
