//! Progressive reveal sequencer.
//!
//! A pure timed state machine: stage index plus elapsed-time input, no
//! rendering or timer dependency. The driver feeds it session snapshots
//! and frame deltas; it answers which result subsections are revealed.

use crate::session::SessionSnapshot;
use std::time::Duration;

/// Delay between consecutive stage starts
pub const STAGE_STAGGER: Duration = Duration::from_millis(150);

/// Result subsections, revealed in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStage {
  /// AI summary plus applied-constraint chips
  Summary,
  /// The top-ranked offer
  Recommended,
  /// Everything below the recommendation
  Alternates,
}

impl RevealStage {
  pub const ALL: [RevealStage; 3] = [RevealStage::Summary, RevealStage::Recommended, RevealStage::Alternates];

  pub fn index(&self) -> usize {
    match self {
      RevealStage::Summary => 0,
      RevealStage::Recommended => 1,
      RevealStage::Alternates => 2,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  Idle,
  Running { elapsed: Duration },
}

#[derive(Debug, Clone)]
pub struct RevealSequencer {
  phase: Phase,
  stagger: Duration,
  last_seq: u64,
}

impl Default for RevealSequencer {
  fn default() -> Self {
    Self::new()
  }
}

impl RevealSequencer {
  pub fn new() -> Self {
    Self::with_stagger(STAGE_STAGGER)
  }

  pub fn with_stagger(stagger: Duration) -> Self {
    Self {
      phase: Phase::Idle,
      stagger,
      last_seq: 0,
    }
  }

  /// Drive the sequencer from a session snapshot.
  ///
  /// A transition into "results visible" starts the run; a new result
  /// arrival (changed `result_seq`) restarts it from stage one; an error
  /// or an empty result set drops straight back to idle.
  pub fn observe(&mut self, snapshot: &SessionSnapshot) {
    if snapshot.error.is_some() || !snapshot.results_visible() {
      self.phase = Phase::Idle;
      return;
    }
    let new_arrival = snapshot.result_seq != self.last_seq;
    if new_arrival || self.phase == Phase::Idle {
      self.phase = Phase::Running {
        elapsed: Duration::ZERO,
      };
      self.last_seq = snapshot.result_seq;
    }
  }

  /// Accumulate elapsed time while running
  pub fn advance(&mut self, delta: Duration) {
    if let Phase::Running { elapsed } = self.phase {
      self.phase = Phase::Running {
        elapsed: elapsed + delta,
      };
    }
  }

  /// Force back to idle with no pending reveal obligation
  pub fn reset(&mut self) {
    self.phase = Phase::Idle;
  }

  pub fn is_idle(&self) -> bool {
    self.phase == Phase::Idle
  }

  /// Stage k reveals once elapsed time reaches k times the stagger, so
  /// stage one shows immediately and later stages may overlap mid-fade
  pub fn is_revealed(&self, stage: RevealStage) -> bool {
    match self.phase {
      Phase::Idle => false,
      Phase::Running { elapsed } => elapsed >= self.stagger * stage.index() as u32,
    }
  }

  pub fn revealed_count(&self) -> usize {
    RevealStage::ALL.iter().filter(|s| self.is_revealed(**s)).count()
  }

  pub fn is_complete(&self) -> bool {
    self.revealed_count() == RevealStage::ALL.len()
  }
}
