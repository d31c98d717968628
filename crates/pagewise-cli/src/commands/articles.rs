use crate::cli::PagingArgs;
use crate::pager::Pager;
use anyhow::Result;
use chrono::Utc;
use pagewise_core::{CancellationToken, Config, NoDelay, PagingConfig, SyntheticFeedLoader};

/// Page the generated article feed.
pub async fn articles(
    config: &Config,
    no_delay: bool,
    args: &PagingArgs,
    token: CancellationToken,
) -> Result<()> {
    let feed = SyntheticFeedLoader::new(Utc::now());
    let feed = if no_delay {
        feed.with_delay(NoDelay)
    } else {
        feed.with_delay(config.feed.delay())
    };

    let paging = args.page_size.map_or_else(
        || config.paging.clone(),
        PagingConfig::with_page_size,
    );
    paging.validate()?;

    let mut pager = Pager::new(feed, paging, token);
    super::drive(&mut pager, args).await
}
