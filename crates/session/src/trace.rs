//! Diagnostic trace view state.
//!
//! Shows the backend's per-step latency breakdown when diagnostics are
//! enabled. Collapsed by default; the open/closed flag lives only on this
//! instance and never persists.

use finch_core::{SearchResponse, TraceStep};

/// Maximum number of trace steps displayed
pub const MAX_TRACE_STEPS: usize = 5;

#[derive(Debug, Clone)]
pub struct TraceView {
  enabled: bool,
  expanded: bool,
}

impl TraceView {
  /// `enabled` comes from the diagnostics config flag
  pub fn new(enabled: bool) -> Self {
    Self {
      enabled,
      expanded: false,
    }
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  pub fn is_expanded(&self) -> bool {
    self.expanded
  }

  pub fn toggle(&mut self) {
    self.expanded = !self.expanded;
  }

  /// The trace renders only when diagnostics are on and the response
  /// actually carries steps
  pub fn is_visible(&self, response: &SearchResponse) -> bool {
    self.enabled && response.debug_trace.as_ref().is_some_and(|t| !t.is_empty())
  }

  /// Up to [`MAX_TRACE_STEPS`] steps, in backend order
  pub fn visible_steps<'a>(&self, response: &'a SearchResponse) -> &'a [TraceStep] {
    if !self.is_visible(response) {
      return &[];
    }
    let steps = response.debug_trace.as_deref().unwrap_or(&[]);
    &steps[..steps.len().min(MAX_TRACE_STEPS)]
  }

  /// Total elapsed ms across the entire trace, not just the displayed
  /// subset
  pub fn total_ms(&self, response: &SearchResponse) -> f64 {
    response
      .debug_trace
      .as_deref()
      .unwrap_or(&[])
      .iter()
      .map(|step| step.ms)
      .sum()
  }
}
