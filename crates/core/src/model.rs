//! Wire types for the remote search contract.
//!
//! The backend speaks camelCase JSON; the quality scorecard endpoint speaks
//! snake_case. Both are modeled here verbatim so the rest of the workspace
//! never touches raw `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort orders the backend understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
  LowestMonthly,
  LowestTotal,
  ShortestTerm,
}

impl SortOrder {
  pub fn as_str(&self) -> &'static str {
    match self {
      SortOrder::LowestMonthly => "lowest_monthly",
      SortOrder::LowestTotal => "lowest_total",
      SortOrder::ShortestTerm => "shortest_term",
    }
  }
}

/// Refinement overlay sent alongside a free-text query.
///
/// Absent keys are omitted on the wire, never null-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinePayload {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub only_zero_apr: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sort: Option<SortOrder>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub max_monthly: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
}

impl RefinePayload {
  pub fn is_empty(&self) -> bool {
    self.only_zero_apr.is_none() && self.sort.is_none() && self.max_monthly.is_none() && self.category.is_none()
  }
}

/// Request body for `POST /v1/search/query`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
  pub query: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub session_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub refine: Option<RefinePayload>,
}

/// How confident the backend is that the user qualifies for an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
  High,
  Med,
  Low,
}

/// One ranked financing offer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferItem {
  pub id: String,
  pub merchant_name: String,
  pub product_name: String,
  pub category: String,
  pub image_url: Option<String>,
  pub total_price: f64,
  pub term_months: u32,
  pub apr: f64,
  pub monthly_payment: f64,
  pub eligibility_confidence: Confidence,
  pub reason: String,
  #[serde(default)]
  pub safety_signals: Vec<String>,
  #[serde(default)]
  pub disclosure: String,
}

/// Suggested refinement the backend thinks is worth offering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineChip {
  pub key: String,
  pub label: String,
}

/// One bar of the monthly-impact comparison series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyImpactBar {
  pub label: String,
  pub value: f64,
}

/// One named stage of the remote ranking pipeline with its elapsed time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
  pub step: String,
  pub ms: f64,
  #[serde(default)]
  pub notes: String,
}

/// Full response of `POST /v1/search/query`.
///
/// `applied_constraints` is kept as an insertion-ordered map: the presenter
/// must preserve the backend's relative order for keys it does not know.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
  pub query: String,
  pub ai_summary: String,
  pub results: Vec<OfferItem>,
  #[serde(default)]
  pub refine_chips: Vec<RefineChip>,
  #[serde(default)]
  pub monthly_impact: Vec<MonthlyImpactBar>,
  #[serde(default)]
  pub disclaimers: Vec<String>,
  #[serde(default)]
  pub applied_constraints: serde_json::Map<String, Value>,
  #[serde(default)]
  pub why_this_recommendation: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub debug_trace: Option<Vec<TraceStep>>,
}

impl SearchResponse {
  pub fn has_results(&self) -> bool {
    !self.results.is_empty()
  }

  /// The top-ranked offer, which the UI treats as the recommendation
  pub fn recommended(&self) -> Option<&OfferItem> {
    self.results.first()
  }

  /// Everything below the recommendation
  pub fn alternates(&self) -> &[OfferItem] {
    if self.results.is_empty() { &[] } else { &self.results[1..] }
  }
}

/// Per-query row of the quality scorecard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorecardQuery {
  pub id: String,
  pub query: String,
  pub passed: bool,
  pub constraint_ok: bool,
  pub latency_ms: f64,
  pub result_count: usize,
  #[serde(default)]
  pub steps: Vec<TraceStep>,
}

/// Aggregate response of `GET /v1/quality/scorecard`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scorecard {
  pub total_queries: usize,
  pub passed: usize,
  pub failed: usize,
  pub constraint_adherence_pct: f64,
  pub avg_latency_ms: f64,
  pub p95_latency_ms: f64,
  #[serde(default)]
  pub step_latencies: serde_json::Map<String, Value>,
  #[serde(default)]
  pub queries: Vec<ScorecardQuery>,
}
