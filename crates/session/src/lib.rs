pub mod reveal;
pub mod scorecard;
pub mod session;
pub mod trace;

pub use reveal::{RevealSequencer, RevealStage, STAGE_STAGGER};
pub use scorecard::ScorecardSummary;
pub use session::{SearchSession, SessionSnapshot, SubmitOutcome};
pub use trace::{MAX_TRACE_STEPS, TraceView};
