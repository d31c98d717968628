use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// A request for one page.
///
/// `key = None` asks for the initial page. The size is guaranteed non-zero by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest<K> {
    key: Option<K>,
    size: NonZeroU32,
}

impl<K> LoadRequest<K> {
    /// Request the first page of a list session.
    pub fn initial(size: u32) -> Result<Self> {
        Ok(Self {
            key: None,
            size: checked_size(size)?,
        })
    }

    /// Request the page that starts at `key`.
    pub fn keyed(key: K, size: u32) -> Result<Self> {
        Ok(Self {
            key: Some(key),
            size: checked_size(size)?,
        })
    }

    /// Build a request from an optional key, as a driver following `next_key` does.
    pub fn new(key: Option<K>, size: u32) -> Result<Self> {
        Ok(Self {
            key,
            size: checked_size(size)?,
        })
    }

    /// Key supplied by the caller, `None` for the initial load.
    pub const fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Number of items requested.
    pub const fn size(&self) -> u32 {
        self.size.get()
    }

    /// Whether this is the first load of a session.
    pub const fn is_initial(&self) -> bool {
        self.key.is_none()
    }
}

impl<K: Copy> LoadRequest<K> {
    /// The key to load from: the caller's key, or `start` for an initial load.
    pub fn effective_key(&self, start: K) -> K {
        self.key.unwrap_or(start)
    }
}

fn checked_size(size: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(size)
        .ok_or_else(|| Error::InvalidRequest("load size must be at least 1".to_string()))
}

/// One loaded page plus the keys of its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<K, I> {
    /// Items in display order.
    pub items: Vec<I>,
    /// Key that re-fetches towards the front, `None` on the first page.
    pub prev_key: Option<K>,
    /// Key of the following page, `None` once the end is reached.
    pub next_key: Option<K>,
}

impl<K, I> Page<K, I> {
    /// Number of items in the page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of a single load.
///
/// Loaders never propagate failures through `Err`; they report them here so the
/// driver can keep its window intact.
#[derive(Debug)]
pub enum LoadResult<K, I> {
    /// The page was loaded.
    Page(Page<K, I>),
    /// The load failed.
    Error(Error),
}

impl<K, I> LoadResult<K, I> {
    /// Whether the load produced a page.
    pub const fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }

    /// Borrow the page, if any.
    pub const fn page(&self) -> Option<&Page<K, I>> {
        match self {
            Self::Page(page) => Some(page),
            Self::Error(_) => None,
        }
    }

    /// Borrow the error, if any.
    pub const fn error(&self) -> Option<&Error> {
        match self {
            Self::Page(_) => None,
            Self::Error(error) => Some(error),
        }
    }

    /// Convert into a standard `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<Page<K, I>> {
        match self {
            Self::Page(page) => Ok(page),
            Self::Error(error) => Err(error),
        }
    }
}

impl<K, I> From<Result<Page<K, I>>> for LoadResult<K, I> {
    fn from(result: Result<Page<K, I>>) -> Self {
        match result {
            Ok(page) => Self::Page(page),
            Err(error) => Self::Error(error),
        }
    }
}
