//! Configuration for loaders and the paging driver.
//!
//! Configuration is stored in TOML. A missing file means defaults; a malformed
//! file is an error.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [search]
//! api_url = "https://api.github.com/"
//! timeout_secs = 30
//!
//! [feed]
//! initial_load_ms = 3000
//! append_load_ms = 1000
//!
//! [paging]
//! page_size = 10
//! initial_load_size = 30
//! max_size = 50
//! prefetch_distance = 1
//! ```
//!
//! The search token may also come from `PAGEWISE_GITHUB_TOKEN`, which wins over
//! the file.

use crate::feed::FixedDelay;
use crate::github::{GITHUB_API_URL, GithubService};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding a GitHub API token.
pub const TOKEN_ENV: &str = "PAGEWISE_GITHUB_TOKEN";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote search settings
    pub search: SearchConfig,
    /// Synthetic feed settings
    pub feed: FeedConfig,
    /// Driver window settings
    pub paging: PagingConfig,
}

/// Settings for the remote repository search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// API root the search endpoint is resolved against.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Optional bearer token for higher rate limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: GITHUB_API_URL.to_string(),
            timeout_secs: 30,
            token: None,
        }
    }
}

impl SearchConfig {
    /// Build the HTTP search client these settings describe.
    pub fn service(&self) -> Result<GithubService> {
        Ok(
            GithubService::with_base_url(&self.api_url, Duration::from_secs(self.timeout_secs))?
                .with_token(self.token.clone()),
        )
    }
}

/// Simulated latencies of the synthetic feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Latency of the first load, in milliseconds.
    pub initial_load_ms: u64,
    /// Latency of later loads, in milliseconds.
    pub append_load_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_load_ms: 3_000,
            append_load_ms: 1_000,
        }
    }
}

impl FeedConfig {
    /// Delay strategy for these latencies.
    pub const fn delay(&self) -> FixedDelay {
        FixedDelay {
            initial: Duration::from_millis(self.initial_load_ms),
            append: Duration::from_millis(self.append_load_ms),
        }
    }
}

/// How a driver sizes loads and bounds its window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Items requested per append.
    pub page_size: u32,
    /// Items requested by the first load.
    pub initial_load_size: u32,
    /// Maximum items kept in the window before dropping from the front.
    pub max_size: usize,
    /// Distance from the window edge that triggers the next load.
    pub prefetch_distance: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            initial_load_size: 30,
            max_size: 50,
            prefetch_distance: 1,
        }
    }
}

impl PagingConfig {
    /// Settings with `page_size`, an initial load three times as large, and a
    /// window of at least five pages.
    pub fn with_page_size(page_size: u32) -> Self {
        let defaults = Self::default();
        Self {
            page_size,
            initial_load_size: page_size.saturating_mul(3),
            max_size: defaults.max_size.max(page_size as usize * 5),
            ..defaults
        }
    }

    /// Check the window can hold what one load plus its prefetch brings in.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.initial_load_size == 0 {
            return Err(Error::Config("page sizes must be at least 1".into()));
        }
        let minimum = self.page_size as usize + 2 * self.prefetch_distance as usize;
        if self.max_size < minimum {
            return Err(Error::Config(format!(
                "max_size {} must be at least page_size + 2 * prefetch_distance ({minimum})",
                self.max_size
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::read(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    /// Check every section for unusable values.
    pub fn validate(&self) -> Result<()> {
        self.paging.validate()?;
        url::Url::parse(&self.search.api_url).map_err(|e| {
            Error::Config(format!("Invalid search.api_url '{}': {e}", self.search.api_url))
        })?;
        if self.search.timeout_secs == 0 {
            return Err(Error::Config("search.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    /// Platform config file location, e.g. `~/.config/pagewise/config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "pagewise", "pagewise")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                tracing::debug!("Using search token from {}", TOKEN_ENV);
                self.search.token = Some(token);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search.api_url, GITHUB_API_URL);
        assert_eq!(config.paging.page_size, 10);
        assert_eq!(config.paging.max_size, 50);
        assert_eq!(config.feed.delay(), FixedDelay::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip_through_file() {
        // Given: A customized config written to disk
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.search.api_url = "http://localhost:8080/".into();
        config.paging = PagingConfig::with_page_size(30);
        config.paging.max_size = 200;
        config.save_to(&path).unwrap();

        // When: Reading it back
        let loaded = Config::read(&path).unwrap();

        // Then: Values survive
        assert_eq!(loaded, config);
        assert_eq!(loaded.paging.initial_load_size, 90);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[feed]\ninitial_load_ms = 0\n").unwrap();

        let config = Config::read(&path).unwrap();
        assert_eq!(config.feed.initial_load_ms, 0);
        assert_eq!(config.feed.append_load_ms, 1_000);
        assert_eq!(config.paging, PagingConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[paging\npage_size = ").unwrap();

        match Config::load_from(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("parse")),
            other => panic!("Expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_window_too_small_rejected() {
        let paging = PagingConfig {
            page_size: 10,
            initial_load_size: 30,
            max_size: 11,
            prefetch_distance: 1,
        };
        assert!(matches!(paging.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut config = Config::default();
        config.search.api_url = "::not a url::".into();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_search_service_from_config() {
        let config = SearchConfig {
            api_url: "http://127.0.0.1:1/api".into(),
            timeout_secs: 1,
            token: Some("abc".into()),
        };
        let service = config.service().unwrap();
        assert_eq!(service.base_url().as_str(), "http://127.0.0.1:1/api/");
    }
}
