//! Repository search loader keyed by 1-based page index.

use crate::github::{Repo, SearchService};
use crate::loader::guarded;
use crate::{Error, KeyedPageLoader, LoadRequest, LoadResult, Page, PagingState, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// First page index of the search API.
pub const STARTING_PAGE_INDEX: u32 = 1;

/// Fixed page granularity of the search API.
pub const NETWORK_PAGE_SIZE: u32 = 30;

/// Qualifier appended to every query to restrict where the text must match.
pub const IN_QUALIFIER: &str = " in:name,description";

/// Pages repository search results for a single query.
///
/// The query is fixed at construction; a new query needs a new loader.
#[derive(Clone)]
pub struct RemoteSearchLoader {
    service: Arc<dyn SearchService>,
    search_text: String,
}

impl RemoteSearchLoader {
    /// Create a loader for `search_text` backed by `service`.
    pub fn new(service: Arc<dyn SearchService>, search_text: impl Into<String>) -> Self {
        Self {
            service,
            search_text: search_text.into(),
        }
    }

    /// The text this loader searches for.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Query string sent upstream.
    pub fn query(&self) -> String {
        format!("{}{IN_QUALIFIER}", self.search_text)
    }

    async fn fetch(&self, request: LoadRequest<u32>) -> Result<Page<u32, Repo>> {
        let position = request.effective_key(STARTING_PAGE_INDEX);
        let size = request.size();

        if size < NETWORK_PAGE_SIZE {
            warn!(
                "Load size {} is below the search granularity {}; next key will repeat",
                size, NETWORK_PAGE_SIZE
            );
        }

        debug!("Loading search page {} (size {})", position, size);
        let response = self.service.search_repos(&self.query(), position, size).await?;
        let repos = response.items;

        let prev_key = request.key().map(|_| position);
        let next_key = if repos.is_empty() {
            None
        } else {
            Some(next_page_index(position, size)?)
        };

        Ok(Page {
            items: repos,
            prev_key,
            next_key,
        })
    }
}

/// Advance a page index by the number of upstream pages a load covered.
fn next_page_index(position: u32, load_size: u32) -> Result<u32> {
    position
        .checked_add(load_size / NETWORK_PAGE_SIZE)
        .ok_or_else(|| {
            Error::Invariant(format!(
                "next page index overflows after {position} with load size {load_size}"
            ))
        })
}

#[async_trait]
impl KeyedPageLoader for RemoteSearchLoader {
    type Key = u32;
    type Item = Repo;

    async fn load(&self, request: LoadRequest<u32>) -> LoadResult<u32, Repo> {
        guarded(self.fetch(request)).await
    }

    /// A keyed page records its own index as `prev_key`, so that index reloads
    /// the anchor page. The first page has no `prev_key` and restarts from
    /// [`STARTING_PAGE_INDEX`].
    fn resolve_refresh_key(&self, state: &PagingState<u32, Repo>) -> Option<u32> {
        state.anchor_page().and_then(|page| page.prev_key)
    }
}
