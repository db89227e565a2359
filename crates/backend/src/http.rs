use crate::{BackendError, SearchBackend};
use async_trait::async_trait;
use finch_core::{Scorecard, SearchRequest, SearchResponse};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the remote ranking service
#[derive(Debug, Clone)]
pub struct HttpBackend {
  client: reqwest::Client,
  base_url: String,
}

impl Default for HttpBackend {
  fn default() -> Self {
    Self::new()
  }
}

impl HttpBackend {
  pub fn new() -> Self {
    Self::with_timeout(DEFAULT_TIMEOUT)
  }

  pub fn with_timeout(timeout: Duration) -> Self {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .unwrap_or_else(|_| reqwest::Client::new());
    Self {
      client,
      base_url: DEFAULT_BASE_URL.to_string(),
    }
  }

  pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
    self.base_url = url.into();
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn search_url(&self) -> String {
    format!("{}/v1/search/query", self.base_url)
  }

  fn scorecard_url(&self) -> String {
    format!("{}/v1/quality/scorecard", self.base_url)
  }

  fn health_url(&self) -> String {
    format!("{}/healthz", self.base_url)
  }

  /// Check if the search service is reachable
  pub async fn check_health(&self) -> bool {
    match self
      .client
      .get(self.health_url())
      .timeout(Duration::from_secs(5))
      .send()
      .await
    {
      Ok(response) => response.status().is_success(),
      Err(_) => false,
    }
  }

  async fn read_error(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    warn!(status, "search service returned an error");
    BackendError::Status { status, message }
  }
}

#[async_trait]
impl SearchBackend for HttpBackend {
  fn name(&self) -> &str {
    "http"
  }

  async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError> {
    debug!(query = %request.query, "sending search request");
    let response = self.client.post(self.search_url()).json(request).send().await?;
    if !response.status().is_success() {
      return Err(Self::read_error(response).await);
    }
    Ok(response.json::<SearchResponse>().await?)
  }

  async fn scorecard(&self) -> Result<Scorecard, BackendError> {
    debug!("fetching quality scorecard");
    let response = self.client.get(self.scorecard_url()).send().await?;
    if !response.status().is_success() {
      return Err(Self::read_error(response).await);
    }
    Ok(response.json::<Scorecard>().await?)
  }
}
