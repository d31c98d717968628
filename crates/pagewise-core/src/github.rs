//! GitHub repository search client and response models.

use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default GitHub REST API root.
pub const GITHUB_API_URL: &str = "https://api.github.com/";

/// A repository record as returned by the search API.
///
/// Passed through to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    /// Stable repository identifier.
    pub id: u64,
    /// Short repository name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Free-form description, if the owner set one.
    pub description: Option<String>,
    /// Browser URL of the repository.
    pub html_url: String,
    /// Star count.
    #[serde(rename = "stargazers_count")]
    pub stars: u64,
    /// Fork count.
    #[serde(rename = "forks_count")]
    pub forks: u64,
    /// Primary language, if detected.
    pub language: Option<String>,
    /// Owning account.
    pub owner: Owner,
}

/// Owner of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Account login.
    pub login: String,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSearchResponse {
    /// Total matches for the query across all pages.
    #[serde(default)]
    pub total_count: u64,
    /// Repositories on this page.
    #[serde(default)]
    pub items: Vec<Repo>,
}

/// Remote repository search, addressed by 1-based page index.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Fetch one page of repositories matching `query`.
    async fn search_repos(&self, query: &str, page: u32, per_page: u32)
    -> Result<RepoSearchResponse>;
}

/// HTTP client for the GitHub repository search API.
pub struct GithubService {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GithubService {
    /// Creates a client for the public GitHub API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(GITHUB_API_URL, Duration::from_secs(30))
    }

    /// Creates a client for another API root (mirrors, Enterprise, tests).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pagewise/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Authenticate requests with a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// API root requests are resolved against.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl SearchService for GithubService {
    async fn search_repos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<RepoSearchResponse> {
        let url = self
            .base_url
            .join("search/repositories")
            .map_err(|e| Error::Config(format!("Invalid search URL: {e}")))?;

        debug!("GET {} q={} page={} per_page={}", url, query, page, per_page);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&[("sort", "stars"), ("q", query)])
            .query(&[("page", page), ("per_page", per_page)]);

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.is_empty())
                .unwrap_or_else(|| reason(status));
            return Err(Error::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: RepoSearchResponse = response.json().await?;
        info!(
            "Fetched {} repos (page {}) of {} for '{}'",
            body.items.len(),
            page,
            body.total_count,
            query
        );
        Ok(body)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    // Url::join drops the last path segment unless it ends with '/'.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| Error::Config(format!("Invalid API URL '{raw}': {e}")))
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}
