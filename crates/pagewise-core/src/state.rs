//! Snapshot of a driver's loaded window, used to pick a refresh key.

use crate::Page;

/// The pages a driver currently holds, in order, plus the last viewed position.
///
/// Positions index into the flattened item list of `pages`. The core only reads
/// this snapshot; the driver owns and mutates the window itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingState<K, I> {
    /// Loaded pages, front to back.
    pub pages: Vec<Page<K, I>>,
    /// Most recently viewed item position, if the user has seen anything yet.
    pub anchor_position: Option<usize>,
}

impl<K, I> PagingState<K, I> {
    /// Build a snapshot from pages and an optional anchor.
    pub const fn new(pages: Vec<Page<K, I>>, anchor_position: Option<usize>) -> Self {
        Self {
            pages,
            anchor_position,
        }
    }

    /// Total number of items across all pages.
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Whether the window holds no items.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Page::is_empty)
    }

    /// Page whose item range contains `position`.
    ///
    /// Positions past the end resolve to the last page. Empty pages never
    /// contain a position. Returns `None` only for an empty window.
    pub fn closest_page_to_position(&self, position: usize) -> Option<&Page<K, I>> {
        let mut remaining = position;
        for page in &self.pages {
            if remaining < page.len() {
                return Some(page);
            }
            remaining -= page.len();
        }
        self.pages.last()
    }

    /// The page under the anchor, if there is an anchor and any page.
    pub fn anchor_page(&self) -> Option<&Page<K, I>> {
        self.anchor_position
            .and_then(|position| self.closest_page_to_position(position))
    }

    /// Item at a flattened position.
    pub fn item_at(&self, position: usize) -> Option<&I> {
        self.pages.iter().flat_map(|page| page.items.iter()).nth(position)
    }
}
