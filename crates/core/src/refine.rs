//! Refinement toggles and the composer that maps them to a wire payload.

use crate::model::{RefinePayload, SortOrder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user-selectable refinement toggle.
///
/// The sort family is mutually exclusive: turning one on turns the others
/// off. `OnlyZeroApr` is an independent filter and stacks with any sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefineToggle {
  OnlyZeroApr,
  LowestMonthly,
  LowestTotal,
  ShortestTerm,
}

/// Sort precedence when a toggle set somehow carries more than one active
/// sort. First match wins; the composer never relies on iteration order.
const SORT_PRECEDENCE: &[RefineToggle] = &[
  RefineToggle::LowestMonthly,
  RefineToggle::LowestTotal,
  RefineToggle::ShortestTerm,
];

impl RefineToggle {
  pub const ALL: [RefineToggle; 4] = [
    RefineToggle::OnlyZeroApr,
    RefineToggle::LowestMonthly,
    RefineToggle::LowestTotal,
    RefineToggle::ShortestTerm,
  ];

  pub fn key(&self) -> &'static str {
    match self {
      RefineToggle::OnlyZeroApr => "only_zero_apr",
      RefineToggle::LowestMonthly => "lowest_monthly",
      RefineToggle::LowestTotal => "lowest_total",
      RefineToggle::ShortestTerm => "shortest_term",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      RefineToggle::OnlyZeroApr => "Only 0% APR",
      RefineToggle::LowestMonthly => "Lower monthly",
      RefineToggle::LowestTotal => "Cheaper total",
      RefineToggle::ShortestTerm => "Shorter term",
    }
  }

  /// Whether this toggle belongs to the mutually-exclusive sort family
  pub fn is_sort(&self) -> bool {
    self.sort_order().is_some()
  }

  pub fn sort_order(&self) -> Option<SortOrder> {
    match self {
      RefineToggle::OnlyZeroApr => None,
      RefineToggle::LowestMonthly => Some(SortOrder::LowestMonthly),
      RefineToggle::LowestTotal => Some(SortOrder::LowestTotal),
      RefineToggle::ShortestTerm => Some(SortOrder::ShortestTerm),
    }
  }
}

/// The set of currently active refinement toggles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleSet {
  active: BTreeSet<RefineToggle>,
}

impl ToggleSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Flip a toggle. Activating a sort toggle deactivates any other active
  /// sort toggle so at most one sort is ever on.
  pub fn toggle(&mut self, toggle: RefineToggle) {
    if self.active.remove(&toggle) {
      return;
    }
    if toggle.is_sort() {
      self.active.retain(|t| !t.is_sort());
    }
    self.active.insert(toggle);
  }

  pub fn is_active(&self, toggle: RefineToggle) -> bool {
    self.active.contains(&toggle)
  }

  pub fn is_empty(&self) -> bool {
    self.active.is_empty()
  }

  pub fn clear(&mut self) {
    self.active.clear();
  }

  pub fn iter(&self) -> impl Iterator<Item = RefineToggle> + '_ {
    self.active.iter().copied()
  }
}

/// Compose the wire payload from a toggle set.
///
/// Pure function: same set in, same payload out, nothing else consulted.
/// Conflicting sorts resolve by `SORT_PRECEDENCE`, and keys whose condition
/// is false are omitted entirely.
pub fn compose(toggles: &ToggleSet) -> RefinePayload {
  let sort = SORT_PRECEDENCE
    .iter()
    .find(|t| toggles.is_active(**t))
    .and_then(|t| t.sort_order());

  RefinePayload {
    only_zero_apr: toggles.is_active(RefineToggle::OnlyZeroApr).then_some(true),
    sort,
    max_monthly: None,
    category: None,
  }
}
