//! Configuration system for finch with per-project overrides.
//!
//! Config priority: project-relative (.finch/config.toml) > user (~/.config/finch/config.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Remote backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
  /// Base URL of the ranking service
  pub base_url: String,

  /// Per-request timeout in seconds (default: 10)
  pub timeout_secs: u64,
}

impl Default for BackendConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8000".to_string(),
      timeout_secs: 10,
    }
  }
}

/// Search session defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Send the session id with each request so the backend can correlate
  /// refinements within one session (default: true)
  pub send_session_id: bool,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self { send_session_id: true }
  }
}

/// Diagnostics settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
  /// Show the per-step pipeline trace when the backend returns one
  /// (default: false)
  pub debug_trace: bool,
}

/// finch configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Remote backend settings
  #[serde(default)]
  pub backend: BackendConfig,

  /// Search session defaults
  #[serde(default)]
  pub search: SearchConfig,

  /// Diagnostics settings
  #[serde(default)]
  pub diagnostics: DiagnosticsConfig,
}

impl Config {
  /// Load config for a project, with fallback to user config
  pub fn load_for_project(project_path: &Path) -> Self {
    // Try project-relative first
    let project_config = Self::project_config_path(project_path);
    if project_config.exists()
      && let Ok(content) = std::fs::read_to_string(&project_config)
      && let Ok(config) = toml::from_str(&content)
    {
      return config;
    }

    // Fall back to user config
    if let Some(user_config_path) = Self::user_config_path()
      && user_config_path.exists()
      && let Ok(content) = std::fs::read_to_string(&user_config_path)
      && let Ok(config) = toml::from_str(&content)
    {
      return config;
    }

    // Default
    Self::default()
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("FINCH_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("finch").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("finch").join("config.toml"))
  }

  /// Get the project-relative config path
  pub fn project_config_path(project_path: &Path) -> PathBuf {
    project_path.join(".finch").join("config.toml")
  }

  /// Generate a default config file as a string
  pub fn generate_template() -> String {
    let defaults = BackendConfig::default();
    format!(
      r#"# finch configuration
# Place in .finch/config.toml (project) or ~/.config/finch/config.toml (user)

[backend]
# Base URL of the ranking service
base_url = "{base_url}"

# Per-request timeout in seconds
timeout_secs = {timeout_secs}

[search]
# Send the session id with each request
send_session_id = true

[diagnostics]
# Show the per-step pipeline trace when the backend returns one
debug_trace = false
"#,
      base_url = defaults.base_url,
      timeout_secs = defaults.timeout_secs,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_load_project_config() {
    let temp = TempDir::new().unwrap();
    let finch_dir = temp.path().join(".finch");
    std::fs::create_dir_all(&finch_dir).unwrap();

    let config_content = r#"
[backend]
base_url = "https://api.example.test"

[diagnostics]
debug_trace = true
"#;
    std::fs::write(finch_dir.join("config.toml"), config_content).unwrap();

    let config = Config::load_for_project(temp.path());
    assert_eq!(config.backend.base_url, "https://api.example.test");
    assert_eq!(config.backend.timeout_secs, 10);
    assert!(config.diagnostics.debug_trace);
  }

  #[test]
  fn test_load_default_when_no_config() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_for_project(temp.path());
    assert_eq!(config.backend.base_url, "http://localhost:8000");
    assert!(!config.diagnostics.debug_trace);
    assert!(config.search.send_session_id);
  }

  #[test]
  fn test_generate_template_parses_back() {
    let template = Config::generate_template();
    let config: Config = toml::from_str(&template).unwrap();
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_toml_roundtrip() {
    let config = Config {
      backend: BackendConfig {
        base_url: "http://10.0.0.5:9000".to_string(),
        timeout_secs: 3,
      },
      search: SearchConfig { send_session_id: false },
      diagnostics: DiagnosticsConfig { debug_trace: true },
    };
    let serialized = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&serialized).unwrap();
    assert_eq!(parsed, config);
  }
}
