use async_trait::async_trait;
use finch_core::{Scorecard, SearchRequest, SearchResponse};

/// The remote-query capability a search session is built on.
///
/// One implementation talks HTTP to the ranking service; tests inject
/// their own to control when and how calls resolve.
#[async_trait]
pub trait SearchBackend: Send + Sync {
  fn name(&self) -> &str;

  async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError>;
  async fn scorecard(&self) -> Result<Scorecard, BackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
  #[error("Request failed: {0}")]
  Request(#[from] reqwest::Error),
  #[error("Search service returned {status}: {message}")]
  Status { status: u16, message: String },
  #[error("Backend error: {0}")]
  Other(String),
}

impl BackendError {
  /// The one user-facing message a failed call surfaces as
  pub fn display_message(&self) -> String {
    match self {
      BackendError::Request(e) if e.is_timeout() => "Search timed out. Try again.".to_string(),
      BackendError::Request(_) => "Could not reach the search service.".to_string(),
      BackendError::Status { status, .. } => format!("Search failed ({status})."),
      BackendError::Other(message) => message.clone(),
    }
  }
}
