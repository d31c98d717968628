//! The keyed page loader contract shared by every data source.

use crate::{Error, LoadRequest, LoadResult, Page, PagingState, Result};
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::fmt::Debug;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A source of pages addressed by keys.
///
/// Implementations hold only immutable configuration (a query, an anchor
/// timestamp) and can be called concurrently. Ordering between loads, stale
/// result handling, and the window of loaded pages all belong to the caller.
#[async_trait]
pub trait KeyedPageLoader: Send + Sync {
    /// Ordering token that identifies where a page begins.
    type Key: Copy + Debug + PartialEq + Send + Sync + 'static;
    /// Item type produced by this loader.
    type Item: Send + 'static;

    /// Load one page.
    ///
    /// Never fails through `Err` and never unwinds: every failure is reported as
    /// [`LoadResult::Error`].
    async fn load(&self, request: LoadRequest<Self::Key>) -> LoadResult<Self::Key, Self::Item>;

    /// Key to rebuild the window from after an invalidation.
    ///
    /// `None` means "start from the loader's starting key".
    fn resolve_refresh_key(
        &self,
        state: &PagingState<Self::Key, Self::Item>,
    ) -> Option<Self::Key>;

    /// Load one page unless `token` is cancelled first.
    ///
    /// On cancellation the in-flight fetch is dropped and
    /// [`Error::Cancelled`] is returned.
    async fn load_cancellable(
        &self,
        request: LoadRequest<Self::Key>,
        token: &CancellationToken,
    ) -> LoadResult<Self::Key, Self::Item> {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("Load for key {:?} cancelled", request.key());
                LoadResult::Error(Error::Cancelled)
            }
            result = self.load(request) => result,
        }
    }
}

/// Run a page fetch so that neither errors nor panics escape.
pub(crate) async fn guarded<K, I, F>(fetch: F) -> LoadResult<K, I>
where
    F: Future<Output = Result<Page<K, I>>>,
{
    match AssertUnwindSafe(fetch).catch_unwind().await {
        Ok(Ok(page)) => LoadResult::Page(page),
        Ok(Err(error)) => {
            warn!(category = error.category(), "Load failed: {}", error);
            LoadResult::Error(error)
        },
        Err(payload) => {
            let message = panic_message(&*payload);
            warn!("Load panicked: {}", message);
            LoadResult::Error(Error::Invariant(format!("loader panicked: {message}")))
        },
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
