//! Constraint chip presenter.
//!
//! Turns the backend's applied-constraints map into a bounded, prioritized
//! list of display labels. Deterministic and side-effect free.

use serde_json::{Map, Value};

/// Maximum number of constraint chips shown before overflowing
pub const MAX_VISIBLE_CONSTRAINTS: usize = 3;

/// Known keys in display-priority order; unknown keys sort after all of
/// these, keeping their relative input order.
const KEY_PRIORITY: &[&str] = &["budget", "maxMonthly", "zeroApr", "category"];

fn priority_rank(key: &str) -> usize {
  KEY_PRIORITY.iter().position(|k| *k == key).unwrap_or(KEY_PRIORITY.len())
}

/// Render a numeric-ish value (JSON number or numeric string) as a plain
/// amount, trimming a trailing ".0" so `500.0` reads as `500`.
fn amount(value: &Value) -> Option<String> {
  let text = match value {
    Value::Number(n) => n.to_string(),
    Value::String(s) => s.trim().to_string(),
    _ => return None,
  };
  if text.is_empty() || text.parse::<f64>().is_err() {
    return None;
  }
  Some(text.trim_end_matches(".0").to_string())
}

fn value_text(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Format one constraint entry, or `None` if it should not produce a chip
/// (a `zeroApr: false` flag carries no information worth displaying).
fn format_entry(key: &str, value: &Value) -> Option<String> {
  match key {
    "budget" => amount(value).map(|a| format!("Under ${a}")),
    "maxMonthly" => amount(value).map(|a| format!("Under ${a}/mo")),
    "zeroApr" => match value {
      Value::Bool(true) => Some("0% APR".to_string()),
      Value::Bool(false) => None,
      other => Some(format!("zeroApr: {}", value_text(other))),
    },
    "category" => Some(value_text(value)),
    other => Some(format!("{}: {}", other, value_text(value))),
  }
}

/// Derive the chip list for an applied-constraints map.
///
/// Entries are ordered by `KEY_PRIORITY`, formatted per key, truncated to
/// [`MAX_VISIBLE_CONSTRAINTS`], and followed by one `+N more` entry when
/// anything was cut.
pub fn present_constraints(constraints: &Map<String, Value>) -> Vec<String> {
  let mut entries: Vec<(usize, usize, String)> = Vec::new();
  for (input_order, (key, value)) in constraints.iter().enumerate() {
    if let Some(label) = format_entry(key, value) {
      entries.push((priority_rank(key), input_order, label));
    }
  }
  // Stable by (priority, input order): unknown keys keep their relative order
  entries.sort_by_key(|(rank, order, _)| (*rank, *order));

  let total = entries.len();
  let mut chips: Vec<String> = entries
    .into_iter()
    .take(MAX_VISIBLE_CONSTRAINTS)
    .map(|(_, _, label)| label)
    .collect();
  if total > MAX_VISIBLE_CONSTRAINTS {
    chips.push(format!("+{} more", total - MAX_VISIBLE_CONSTRAINTS));
  }
  chips
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn map(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
  }

  #[test]
  fn orders_by_priority_and_overflows() {
    // Spec scenario: four entries, priority [budget, maxMonthly, zeroApr,
    // category], cap of three plus one overflow marker.
    let constraints = map(json!({
      "category": "electronics",
      "budget": "500",
      "zeroApr": true,
      "foo": "bar"
    }));
    let chips = present_constraints(&constraints);
    assert_eq!(chips, vec!["Under $500", "0% APR", "electronics", "+1 more"]);
  }

  #[test]
  fn under_cap_emits_no_overflow() {
    let constraints = map(json!({"budget": 800, "category": "travel"}));
    let chips = present_constraints(&constraints);
    assert_eq!(chips, vec!["Under $800", "travel"]);
  }

  #[test]
  fn overflow_count_matches_remainder() {
    let constraints = map(json!({
      "budget": "500",
      "maxMonthly": 50,
      "zeroApr": true,
      "category": "fitness",
      "brand": "peloton",
      "condition": "new"
    }));
    let chips = present_constraints(&constraints);
    assert_eq!(chips.len(), MAX_VISIBLE_CONSTRAINTS + 1);
    assert_eq!(chips[0], "Under $500");
    assert_eq!(chips[1], "Under $50/mo");
    assert_eq!(chips[2], "0% APR");
    assert_eq!(chips[3], "+3 more");
  }

  #[test]
  fn unknown_keys_keep_input_order_after_known_keys() {
    let constraints = map(json!({
      "beta": "2",
      "category": "sneakers",
      "alpha": "1"
    }));
    let chips = present_constraints(&constraints);
    assert_eq!(chips, vec!["sneakers", "beta: 2", "alpha: 1"]);
  }

  #[test]
  fn false_zero_apr_flag_is_skipped() {
    let constraints = map(json!({"zeroApr": false, "budget": "300"}));
    let chips = present_constraints(&constraints);
    assert_eq!(chips, vec!["Under $300"]);
  }

  #[test]
  fn numeric_values_accepted_as_numbers_or_strings() {
    let as_number = map(json!({"budget": 500}));
    let as_string = map(json!({"budget": "500"}));
    assert_eq!(present_constraints(&as_number), present_constraints(&as_string));
  }

  #[test]
  fn non_numeric_budget_produces_no_chip() {
    let constraints = map(json!({"budget": "whatever", "category": "travel"}));
    assert_eq!(present_constraints(&constraints), vec!["travel"]);
  }

  #[test]
  fn presenter_is_idempotent() {
    let constraints = map(json!({
      "category": "electronics",
      "budget": "500",
      "zeroApr": true,
      "foo": "bar"
    }));
    let first = present_constraints(&constraints);
    let second = present_constraints(&constraints);
    assert_eq!(first, second);
  }

  #[test]
  fn empty_map_yields_no_chips() {
    assert!(present_constraints(&Map::new()).is_empty());
  }
}
