//! # pagewise-core
//!
//! Keyed page loaders for lists that load incrementally.
//!
//! A loader answers one question: given a key (or none, for the first page) and
//! a requested size, what are the items of that page and which keys fetch its
//! neighbours? Everything else, the window of loaded pages, prefetching, and
//! discarding stale results, belongs to the driver that calls it.
//!
//! ## Loaders
//!
//! - [`RemoteSearchLoader`]: GitHub repository search, keyed by 1-based page index
//! - [`SyntheticFeedLoader`]: generated articles, keyed by item offset
//!
//! Both implement [`KeyedPageLoader`], and both report failures as
//! [`LoadResult::Error`] instead of returning `Err` or unwinding.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagewise_core::{KeyedPageLoader, LoadRequest, NoDelay, SyntheticFeedLoader};
//!
//! # async fn demo() -> pagewise_core::Result<()> {
//! let feed = SyntheticFeedLoader::new(chrono::Utc::now()).with_delay(NoDelay);
//! let first = feed.load(LoadRequest::initial(10)?).await.into_result()?;
//! assert_eq!(first.next_key, Some(10));
//!
//! let second = feed.load(LoadRequest::new(first.next_key, 10)?).await.into_result()?;
//! assert_eq!(second.prev_key, Some(0));
//! # Ok(())
//! # }
//! ```

/// Article records and their display wrapper
pub mod article;
/// Loader and driver configuration
pub mod config;
/// Error types and result aliases
pub mod error;
/// Synthetic article feed loader
pub mod feed;
/// GitHub search API client
pub mod github;
/// The keyed page loader contract
pub mod loader;
/// Remote repository search loader
pub mod search;
/// Window snapshot for refresh-key resolution
pub mod state;
/// Requests, pages, and load results
pub mod types;

pub use article::{Article, ArticleEntity};
pub use config::{Config, FeedConfig, PagingConfig, SearchConfig};
pub use error::{Error, ErrorKind, Result};
pub use feed::{FixedDelay, LoadDelay, LoadPhase, NoDelay, SyntheticFeedLoader};
pub use github::{GithubService, Owner, Repo, RepoSearchResponse, SearchService};
pub use loader::KeyedPageLoader;
pub use search::RemoteSearchLoader;
pub use state::PagingState;
pub use types::{LoadRequest, LoadResult, Page};

pub use tokio_util::sync::CancellationToken;
