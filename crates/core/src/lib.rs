pub mod config;
pub mod constraints;
pub mod model;
pub mod refine;

pub use config::{BackendConfig, Config, DiagnosticsConfig, SearchConfig};
pub use constraints::{MAX_VISIBLE_CONSTRAINTS, present_constraints};
pub use model::{
  Confidence, MonthlyImpactBar, OfferItem, RefineChip, RefinePayload, Scorecard, ScorecardQuery, SearchRequest,
  SearchResponse, SortOrder, TraceStep,
};
pub use refine::{RefineToggle, ToggleSet, compose};
