//! Read-only view model over the quality scorecard contract.

use finch_core::Scorecard;

/// Aggregate quality metrics shaped for display
#[derive(Debug, Clone, PartialEq)]
pub struct ScorecardSummary {
  pub total_queries: usize,
  pub passed: usize,
  pub failed: usize,
  pub pass_rate_pct: f64,
  pub constraint_adherence_pct: f64,
  pub avg_latency_ms: f64,
  pub p95_latency_ms: f64,
  /// Per-step average latency, most expensive first
  pub step_latencies: Vec<(String, f64)>,
}

impl ScorecardSummary {
  pub fn from_scorecard(scorecard: &Scorecard) -> Self {
    let pass_rate_pct = if scorecard.total_queries > 0 {
      scorecard.passed as f64 * 100.0 / scorecard.total_queries as f64
    } else {
      0.0
    };

    let mut step_latencies: Vec<(String, f64)> = scorecard
      .step_latencies
      .iter()
      .filter_map(|(step, ms)| ms.as_f64().map(|ms| (step.clone(), ms)))
      .collect();
    // Descending by cost, then by name so equal costs order deterministically
    step_latencies.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Self {
      total_queries: scorecard.total_queries,
      passed: scorecard.passed,
      failed: scorecard.failed,
      pass_rate_pct,
      constraint_adherence_pct: scorecard.constraint_adherence_pct,
      avg_latency_ms: scorecard.avg_latency_ms,
      p95_latency_ms: scorecard.p95_latency_ms,
      step_latencies,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn sample() -> Scorecard {
    serde_json::from_value(json!({
      "total_queries": 8,
      "passed": 6,
      "failed": 2,
      "constraint_adherence_pct": 91.0,
      "avg_latency_ms": 40.0,
      "p95_latency_ms": 95.0,
      "step_latencies": {"ingress": 0.5, "retrieve": 12.0, "rerank": 12.0, "summarize": 20.5},
      "queries": []
    }))
    .unwrap()
  }

  #[test]
  fn pass_rate_from_counts() {
    let summary = ScorecardSummary::from_scorecard(&sample());
    assert_eq!(summary.pass_rate_pct, 75.0);
    assert_eq!(summary.passed, 6);
    assert_eq!(summary.failed, 2);
  }

  #[test]
  fn zero_queries_gives_zero_pass_rate() {
    let scorecard = serde_json::from_value(json!({
      "total_queries": 0,
      "passed": 0,
      "failed": 0,
      "constraint_adherence_pct": 0.0,
      "avg_latency_ms": 0.0,
      "p95_latency_ms": 0.0
    }))
    .unwrap();
    let summary = ScorecardSummary::from_scorecard(&scorecard);
    assert_eq!(summary.pass_rate_pct, 0.0);
  }

  #[test]
  fn step_latencies_sorted_most_expensive_first() {
    let summary = ScorecardSummary::from_scorecard(&sample());
    let names: Vec<&str> = summary.step_latencies.iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(names, vec!["summarize", "rerank", "retrieve", "ingress"]);
  }
}
