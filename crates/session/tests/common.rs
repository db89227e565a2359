//! Common test utilities for session integration tests.
//!
//! `ManualBackend` is a search backend whose calls park on oneshot channels
//! until the test resolves them, so resolution order is fully scripted.

use async_trait::async_trait;
use backend::{BackendError, SearchBackend};
use finch_core::{Confidence, OfferItem, Scorecard, SearchRequest, SearchResponse};
use std::sync::Mutex;
use tokio::sync::oneshot;

type SearchOutcome = Result<SearchResponse, BackendError>;

struct PendingCall {
  request: SearchRequest,
  responder: Option<oneshot::Sender<SearchOutcome>>,
}

#[derive(Default)]
pub struct ManualBackend {
  calls: Mutex<Vec<PendingCall>>,
  scorecard: Mutex<Option<Scorecard>>,
}

#[allow(dead_code)]
impl ManualBackend {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().unwrap().len()
  }

  /// The request captured for the nth call
  pub fn request(&self, index: usize) -> SearchRequest {
    self.calls.lock().unwrap()[index].request.clone()
  }

  /// Resolve the nth call with the given outcome
  pub fn resolve(&self, index: usize, outcome: SearchOutcome) {
    let responder = self.calls.lock().unwrap()[index]
      .responder
      .take()
      .expect("call already resolved");
    responder.send(outcome).ok();
  }

  /// Yield until `count` calls have been issued
  pub async fn wait_for_calls(&self, count: usize) {
    for _ in 0..1000 {
      if self.call_count() >= count {
        return;
      }
      tokio::task::yield_now().await;
    }
    panic!("expected {} calls, saw {}", count, self.call_count());
  }

  pub fn set_scorecard(&self, scorecard: Scorecard) {
    *self.scorecard.lock().unwrap() = Some(scorecard);
  }
}

#[async_trait]
impl SearchBackend for ManualBackend {
  fn name(&self) -> &str {
    "manual"
  }

  async fn search(&self, request: &SearchRequest) -> SearchOutcome {
    let (tx, rx) = oneshot::channel();
    self.calls.lock().unwrap().push(PendingCall {
      request: request.clone(),
      responder: Some(tx),
    });
    rx.await
      .unwrap_or_else(|_| Err(BackendError::Other("backend dropped".to_string())))
  }

  async fn scorecard(&self) -> Result<Scorecard, BackendError> {
    self
      .scorecard
      .lock()
      .unwrap()
      .clone()
      .ok_or_else(|| BackendError::Other("no scorecard configured".to_string()))
  }
}

/// A response with `count` ranked offers for `query`
#[allow(dead_code)]
pub fn response(query: &str, count: usize) -> SearchResponse {
  let results = (0..count)
    .map(|i| OfferItem {
      id: format!("{query}-offer-{i}"),
      merchant_name: "TechHub".to_string(),
      product_name: format!("Product {i}"),
      category: "electronics".to_string(),
      image_url: None,
      total_price: 500.0 + i as f64 * 50.0,
      term_months: 12,
      apr: 0.0,
      monthly_payment: 45.0,
      eligibility_confidence: Confidence::High,
      reason: "fits the budget".to_string(),
      safety_signals: vec![],
      disclosure: String::new(),
    })
    .collect();
  SearchResponse {
    query: query.to_string(),
    ai_summary: format!("Results for {query}"),
    results,
    refine_chips: vec![],
    monthly_impact: vec![],
    disclaimers: vec![],
    applied_constraints: serde_json::Map::new(),
    why_this_recommendation: String::new(),
    debug_trace: None,
  }
}
