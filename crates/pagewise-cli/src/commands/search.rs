use crate::cli::PagingArgs;
use crate::pager::Pager;
use anyhow::{Context, Result};
use pagewise_core::search::NETWORK_PAGE_SIZE;
use pagewise_core::{CancellationToken, Config, PagingConfig, RemoteSearchLoader};
use std::sync::Arc;

/// Page repository search results for `query`.
pub async fn search(
    config: &Config,
    query: &str,
    api_url: Option<&str>,
    args: &PagingArgs,
    token: CancellationToken,
) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("search query must not be empty");
    }

    let mut search_config = config.search.clone();
    if let Some(url) = api_url {
        search_config.api_url = url.to_string();
    }
    let service = search_config
        .service()
        .context("Failed to create search client")?;

    // Page keys count upstream pages of 30, so appends must stay at that size.
    if let Some(size) = args.page_size.filter(|size| *size != NETWORK_PAGE_SIZE) {
        anyhow::bail!("search pages hold {NETWORK_PAGE_SIZE} results, got --page-size {size}");
    }
    let paging = PagingConfig::with_page_size(NETWORK_PAGE_SIZE);
    paging.validate()?;

    let loader = RemoteSearchLoader::new(Arc::new(service), query);
    let mut pager = Pager::new(loader, paging, token);
    super::drive(&mut pager, args).await
}
