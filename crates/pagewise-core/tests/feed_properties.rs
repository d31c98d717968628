#![allow(clippy::unwrap_used)]
//! Key arithmetic properties of the synthetic feed.

use chrono::{TimeDelta, TimeZone, Utc};
use futures::executor::block_on;
use pagewise_core::{KeyedPageLoader, LoadRequest, NoDelay, Page, SyntheticFeedLoader};
use pagewise_core::{ArticleEntity, PagingState};
use proptest::prelude::*;

fn feed() -> SyntheticFeedLoader {
    SyntheticFeedLoader::new(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()).with_delay(NoDelay)
}

fn load(loader: &SyntheticFeedLoader, key: Option<u32>, size: u32) -> Page<u32, ArticleEntity> {
    block_on(loader.load(LoadRequest::new(key, size).unwrap()))
        .into_result()
        .unwrap()
}

proptest! {
    #[test]
    fn page_holds_requested_offsets(offset in 0_u32..1_000_000, size in 1_u32..200) {
        let loader = feed();
        let page = load(&loader, Some(offset), size);

        prop_assert_eq!(page.len(), size as usize);
        for (i, article) in page.items.iter().enumerate() {
            let expected = offset + u32::try_from(i).unwrap();
            prop_assert_eq!(article.id, expected);
            prop_assert_eq!(
                article.created,
                loader.anchor() - TimeDelta::days(i64::from(expected))
            );
        }
        prop_assert_eq!(page.next_key, Some(offset + size));
    }

    #[test]
    fn prev_key_rule(offset in 0_u32..1_000_000, size in 1_u32..200) {
        let page = load(&feed(), Some(offset), size);
        let expected = if offset == 0 { None } else { Some(offset.saturating_sub(size)) };
        prop_assert_eq!(page.prev_key, expected);
    }

    #[test]
    fn initial_load_has_no_prev(size in 1_u32..500) {
        let page = load(&feed(), None, size);
        prop_assert_eq!(page.prev_key, None);
        prop_assert_eq!(page.items[0].id, 0);
    }

    #[test]
    fn chained_pages_never_repeat(size in 1_u32..100, hops in 1_usize..8) {
        let loader = feed();
        let mut previous = load(&loader, None, size);
        for _ in 0..hops {
            let next = load(&loader, previous.next_key, size);
            let last_id = previous.items.last().unwrap().id;
            prop_assert_eq!(next.items[0].id, last_id + 1);
            previous = next;
        }
    }

    #[test]
    fn refresh_key_reloads_anchor_page(size in 1_u32..50, pages in 1_usize..6, pick in 0_usize..300) {
        let loader = feed();
        let mut window = vec![load(&loader, None, size)];
        while window.len() < pages {
            let next_key = window.last().unwrap().next_key;
            window.push(load(&loader, next_key, size));
        }
        let state = PagingState::new(window, Some(pick));
        let anchor_page = state.anchor_page().unwrap().clone();

        let refreshed = load(&loader, loader.resolve_refresh_key(&state), size);
        prop_assert_eq!(refreshed.items[0].id, anchor_page.items[0].id);
    }
}
