//! Minimal paging driver: owns the window and decides what to load next.

use pagewise_core::{
    CancellationToken, KeyedPageLoader, LoadRequest, Page, PagingConfig, PagingState, Result,
};
use tracing::{debug, info};

/// Loads pages from a loader into a bounded window.
///
/// Pages are appended at the back; once the window exceeds `max_size` items,
/// whole pages are dropped from the front (the newest page is always kept).
pub struct Pager<L: KeyedPageLoader> {
    loader: L,
    config: PagingConfig,
    token: CancellationToken,
    pages: Vec<Page<L::Key, L::Item>>,
    dropped: usize,
}

impl<L: KeyedPageLoader> Pager<L> {
    pub fn new(loader: L, config: PagingConfig, token: CancellationToken) -> Self {
        Self {
            loader,
            config,
            token,
            pages: Vec::new(),
            dropped: 0,
        }
    }

    pub const fn loader(&self) -> &L {
        &self.loader
    }

    pub fn pages(&self) -> &[Page<L::Key, L::Item>] {
        &self.pages
    }

    /// Items currently in the window, front to back.
    pub fn items(&self) -> impl Iterator<Item = &L::Item> {
        self.pages.iter().flat_map(|page| page.items.iter())
    }

    /// Pages dropped from the front so far.
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Whether the last page reported the end of the data.
    pub fn is_exhausted(&self) -> bool {
        self.pages.last().is_some_and(|page| page.next_key.is_none())
    }

    /// Discard the window and load the first page from `key`.
    ///
    /// Only a load from the start uses `initial_load_size`. A keyed refresh
    /// asks for `page_size`, the size the key was computed for.
    pub async fn refresh(&mut self, key: Option<L::Key>) -> Result<()> {
        debug!("Refreshing window from key {:?}", key);
        let size = if key.is_some() {
            self.config.page_size
        } else {
            self.config.initial_load_size
        };
        let request = LoadRequest::new(key, size)?;
        let page = self
            .loader
            .load_cancellable(request, &self.token)
            .await
            .into_result()?;
        self.pages = vec![page];
        self.dropped = 0;
        Ok(())
    }

    /// Load the page after the window. Returns `false` at the end of the data.
    pub async fn append(&mut self) -> Result<bool> {
        let Some(key) = self.pages.last().and_then(|page| page.next_key) else {
            return Ok(false);
        };
        let request = LoadRequest::keyed(key, self.config.page_size)?;
        let page = self
            .loader
            .load_cancellable(request, &self.token)
            .await
            .into_result()?;
        let appended = !page.is_empty() || page.next_key.is_some();
        self.pages.push(page);
        self.trim();
        Ok(appended)
    }

    /// Load until `count` pages have been loaded or the data ends.
    pub async fn load_pages(&mut self, count: u32) -> Result<()> {
        if self.pages.is_empty() {
            self.refresh(None).await?;
        }
        let mut loaded = 1;
        while loaded < count && self.append().await? {
            loaded += 1;
        }
        info!(
            "Loaded {} page(s), {} item(s) in window",
            loaded,
            self.items().count()
        );
        Ok(())
    }

    /// Snapshot of the window anchored at `position`.
    pub fn state(&self, position: Option<usize>) -> PagingState<L::Key, L::Item>
    where
        L::Item: Clone,
    {
        PagingState::new(self.pages.clone(), position)
    }

    /// Resolve a refresh key for `position` and rebuild the window from it.
    pub async fn refresh_at(&mut self, position: usize) -> Result<Option<L::Key>>
    where
        L::Item: Clone,
    {
        let key = self.loader.resolve_refresh_key(&self.state(Some(position)));
        info!("Refresh at position {} resolved to key {:?}", position, key);
        self.refresh(key).await?;
        Ok(key)
    }

    fn trim(&mut self) {
        let mut total: usize = self.pages.iter().map(Page::len).sum();
        while total > self.config.max_size && self.pages.len() > 1 {
            let front = self.pages.remove(0);
            total -= front.len();
            self.dropped += 1;
            debug!("Dropped {} item(s) from the front of the window", front.len());
        }
    }
}
