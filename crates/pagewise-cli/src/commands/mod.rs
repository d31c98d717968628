//! Command implementations.

mod articles;
mod search;

pub use articles::articles;
pub use search::search;

use crate::cli::PagingArgs;
use crate::output::{DisplayLine, render};
use crate::pager::Pager;
use anyhow::Result;
use pagewise_core::KeyedPageLoader;
use serde::Serialize;

/// Load the requested pages, optionally refresh, and print the window.
async fn drive<L>(pager: &mut Pager<L>, args: &PagingArgs) -> Result<()>
where
    L: KeyedPageLoader<Key = u32>,
    L::Item: Clone + DisplayLine + Serialize,
{
    pager.load_pages(args.pages).await?;

    let refresh_key = match args.refresh_at {
        Some(position) => Some(pager.refresh_at(position).await?),
        None => None,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(
        &mut out,
        args.format,
        pager.pages(),
        pager.dropped(),
        refresh_key,
    )
}
