//! Infinite feed of generated articles keyed by item offset.

use crate::article::ArticleEntity;
use crate::loader::guarded;
use crate::{Error, KeyedPageLoader, LoadRequest, LoadResult, Page, PagingState, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Offset of the first article.
pub const STARTING_KEY: u32 = 0;

/// Simulated latency of the first load of a session.
pub const INITIAL_LOAD_TIME: Duration = Duration::from_millis(3_000);

/// Simulated latency of every later load.
pub const APPEND_LOAD_TIME: Duration = Duration::from_millis(1_000);

const DESCRIPTIONS: [&str; 2] = ["An interesting article", "A boring article"];

/// Which kind of load is being delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// First load of a session (no key).
    Initial,
    /// Load of an adjacent page.
    Append,
}

/// Strategy for simulating fetch latency.
#[async_trait]
pub trait LoadDelay: Send + Sync {
    /// Wait as long as a load of `phase` should take.
    async fn wait(&self, phase: LoadPhase);
}

/// Sleeps a fixed duration per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    /// Latency of the initial load.
    pub initial: Duration,
    /// Latency of every other load.
    pub append: Duration,
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self {
            initial: INITIAL_LOAD_TIME,
            append: APPEND_LOAD_TIME,
        }
    }
}

#[async_trait]
impl LoadDelay for FixedDelay {
    async fn wait(&self, phase: LoadPhase) {
        let duration = match phase {
            LoadPhase::Initial => self.initial,
            LoadPhase::Append => self.append,
        };
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Returns immediately. For tests and offline demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl LoadDelay for NoDelay {
    async fn wait(&self, _phase: LoadPhase) {}
}

/// Hook consulted on every load; returning an error fails that load.
pub type FailureHook = Arc<dyn Fn(&LoadRequest<u32>) -> Option<Error> + Send + Sync>;

/// Generates articles on demand.
///
/// Article `n` is titled `Article #n` and was created `n` days before the
/// anchor timestamp given at construction.
#[derive(Clone)]
pub struct SyntheticFeedLoader {
    anchor: DateTime<Utc>,
    delay: Arc<dyn LoadDelay>,
    failure_hook: Option<FailureHook>,
}

impl SyntheticFeedLoader {
    /// Create a feed anchored at `anchor` with the default latencies.
    pub fn new(anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            delay: Arc::new(FixedDelay::default()),
            failure_hook: None,
        }
    }

    /// Replace the latency strategy.
    #[must_use]
    pub fn with_delay(mut self, delay: impl LoadDelay + 'static) -> Self {
        self.delay = Arc::new(delay);
        self
    }

    /// Install a failure-injection hook.
    #[must_use]
    pub fn with_failure_hook(
        mut self,
        hook: impl Fn(&LoadRequest<u32>) -> Option<Error> + Send + Sync + 'static,
    ) -> Self {
        self.failure_hook = Some(Arc::new(hook));
        self
    }

    /// Creation time of the newest article.
    pub const fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Build the article at `offset`.
    pub fn article(&self, offset: u32) -> Result<ArticleEntity> {
        let created = self
            .anchor
            .checked_sub_signed(TimeDelta::days(i64::from(offset)))
            .ok_or_else(|| {
                Error::Invariant(format!("creation time out of range for article {offset}"))
            })?;
        let description = DESCRIPTIONS[usize::from(rand::random::<bool>())];

        Ok(ArticleEntity {
            id: offset,
            title: format!("Article #{offset}"),
            description: description.to_string(),
            created,
            selected: false,
        })
    }

    async fn fetch(&self, request: LoadRequest<u32>) -> Result<Page<u32, ArticleEntity>> {
        let start = request.effective_key(STARTING_KEY);
        let size = request.size();
        let end = start.checked_add(size).ok_or_else(|| {
            Error::Invariant(format!("article range overflows at {start} + {size}"))
        })?;

        debug!("Loading articles {}..{}", start, end);
        let phase = if request.is_initial() {
            LoadPhase::Initial
        } else {
            LoadPhase::Append
        };
        self.delay.wait(phase).await;

        if let Some(error) = self.failure_hook.as_ref().and_then(|hook| hook(&request)) {
            return Err(error);
        }

        let items = (start..end)
            .map(|offset| self.article(offset))
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            items,
            prev_key: (start != STARTING_KEY).then(|| start.saturating_sub(size)),
            next_key: Some(end),
        })
    }
}

#[async_trait]
impl KeyedPageLoader for SyntheticFeedLoader {
    type Key = u32;
    type Item = ArticleEntity;

    async fn load(&self, request: LoadRequest<u32>) -> LoadResult<u32, ArticleEntity> {
        guarded(self.fetch(request)).await
    }

    /// Restart at the first offset of the anchor page.
    ///
    /// The next key minus the page length is exact for every page this loader
    /// produces; the previous key is clamped at zero, so it is only the fallback.
    fn resolve_refresh_key(&self, state: &PagingState<u32, ArticleEntity>) -> Option<u32> {
        let page = state.anchor_page()?;
        let len = u32::try_from(page.len()).ok()?;
        let start = page
            .next_key
            .and_then(|next| next.checked_sub(len))
            .or_else(|| page.prev_key.and_then(|prev| prev.checked_add(len)))?;
        (start != STARTING_KEY).then_some(start)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap()
    }

    fn loader() -> SyntheticFeedLoader {
        SyntheticFeedLoader::new(anchor()).with_delay(NoDelay)
    }

    #[tokio::test]
    async fn test_initial_then_append() {
        // Given: A feed with no latency
        let feed = loader();

        // When: Loading the first page and following its next key
        let first = feed
            .load(LoadRequest::initial(10).unwrap())
            .await
            .into_result()
            .unwrap();
        let second = feed
            .load(LoadRequest::new(first.next_key, 10).unwrap())
            .await
            .into_result()
            .unwrap();

        // Then: Pages are contiguous with the expected keys
        assert_eq!(
            first.items.iter().map(|a| a.id).collect::<Vec<_>>(),
            (0..10).collect::<Vec<_>>()
        );
        assert_eq!(first.prev_key, None);
        assert_eq!(first.next_key, Some(10));

        assert_eq!(second.items[0].id, 10);
        assert_eq!(second.items[9].id, 19);
        assert_eq!(second.prev_key, Some(0));
        assert_eq!(second.next_key, Some(20));
    }

    #[tokio::test]
    async fn test_prev_key_clamped_at_start() {
        let page = loader()
            .load(LoadRequest::keyed(5, 10).unwrap())
            .await
            .into_result()
            .unwrap();
        assert_eq!(page.prev_key, Some(0));
        assert_eq!(page.next_key, Some(15));
    }

    #[tokio::test]
    async fn test_explicit_zero_key_has_no_prev() {
        let page = loader()
            .load(LoadRequest::keyed(0, 4).unwrap())
            .await
            .into_result()
            .unwrap();
        assert_eq!(page.prev_key, None);
    }

    #[tokio::test]
    async fn test_generated_fields() {
        let page = loader()
            .load(LoadRequest::keyed(3, 2).unwrap())
            .await
            .into_result()
            .unwrap();
        let article = &page.items[0];
        assert_eq!(article.title, "Article #3");
        assert!(DESCRIPTIONS.contains(&article.description.as_str()));
        assert_eq!(article.created, anchor() - TimeDelta::days(3));
        assert!(!article.selected);
    }

    #[tokio::test]
    async fn test_range_overflow_is_invariant() {
        let result = loader()
            .load(LoadRequest::keyed(u32::MAX - 1, 10).unwrap())
            .await;
        assert_eq!(
            result.error().unwrap().kind(),
            ErrorKind::InvariantViolation
        );
    }

    #[tokio::test]
    async fn test_failure_hook_funnels_into_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let feed = loader().with_failure_hook(move |request| {
            counter.fetch_add(1, Ordering::SeqCst);
            (request.key() == Some(&20)).then(|| Error::Injected("offline".into()))
        });

        assert!(feed.load(LoadRequest::keyed(10, 10).unwrap()).await.is_page());
        let failed = feed.load(LoadRequest::keyed(20, 10).unwrap()).await;
        assert_eq!(failed.error().unwrap().kind(), ErrorKind::TransportFailure);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_initial_load_waits_longer() {
        let feed = SyntheticFeedLoader::new(anchor()).with_delay(FixedDelay {
            initial: Duration::from_millis(120),
            append: Duration::from_millis(10),
        });

        let started = Instant::now();
        feed.load(LoadRequest::initial(1).unwrap()).await;
        let initial = started.elapsed();

        let started = Instant::now();
        feed.load(LoadRequest::keyed(1, 1).unwrap()).await;
        let append = started.elapsed();

        assert!(initial >= Duration::from_millis(120));
        assert!(append < initial);
    }

    #[test]
    fn test_refresh_key_is_anchor_page_start() {
        let feed = loader();
        let page = |start: u32, size: u32| Page {
            items: (start..start + size)
                .map(|offset| feed.article(offset).unwrap())
                .collect(),
            prev_key: (start != 0).then(|| start.saturating_sub(size)),
            next_key: Some(start + size),
        };
        let pages = vec![page(0, 30), page(30, 10), page(40, 10)];

        let on_first = PagingState::new(pages.clone(), Some(3));
        assert_eq!(feed.resolve_refresh_key(&on_first), None);

        let on_second = PagingState::new(pages.clone(), Some(35));
        assert_eq!(feed.resolve_refresh_key(&on_second), Some(30));

        let past_end = PagingState::new(pages.clone(), Some(500));
        assert_eq!(feed.resolve_refresh_key(&past_end), Some(40));

        let clamped = PagingState::new(vec![page(5, 10)], Some(0));
        assert_eq!(feed.resolve_refresh_key(&clamped), Some(5));
    }
}
