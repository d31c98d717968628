//! Rendering of a loaded window.

use crate::cli::OutputFormat;
use anyhow::Result;
use pagewise_core::{Article, ArticleEntity, Page, Repo};
use serde::Serialize;
use std::io::Write;

/// Text rendering of one item.
pub trait DisplayLine {
    fn display_line(&self) -> String;
}

impl DisplayLine for Repo {
    fn display_line(&self) -> String {
        let description = self.description.as_deref().unwrap_or("No description");
        let language = self
            .language
            .as_deref()
            .map(|lang| format!(" [{lang}]"))
            .unwrap_or_default();
        format!(
            "{} ({} stars, {} forks){} - {}",
            self.full_name, self.stars, self.forks, language, description
        )
    }
}

impl DisplayLine for ArticleEntity {
    fn display_line(&self) -> String {
        let article = Article::from(self.clone());
        format!(
            "{:>5}  {}  {}  {}",
            article.id(),
            article.created_text(),
            article.title(),
            article.description()
        )
    }
}

#[derive(Serialize)]
struct Report<'a, I: Serialize> {
    pages: &'a [Page<u32, I>],
    dropped_pages: usize,
    item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_key: Option<Option<u32>>,
}

/// Write the window in the requested format.
pub fn render<I, W>(
    out: &mut W,
    format: OutputFormat,
    pages: &[Page<u32, I>],
    dropped_pages: usize,
    refresh_key: Option<Option<u32>>,
) -> Result<()>
where
    I: DisplayLine + Serialize,
    W: Write,
{
    match format {
        OutputFormat::Text => {
            for item in pages.iter().flat_map(|page| page.items.iter()) {
                writeln!(out, "{}", item.display_line())?;
            }
            let next = pages.last().and_then(|page| page.next_key);
            match next {
                Some(key) => writeln!(out, "-- next key: {key}")?,
                None => writeln!(out, "-- end of results")?,
            }
        },
        OutputFormat::Json => {
            let report = Report {
                pages,
                dropped_pages,
                item_count: pages.iter().map(Page::len).sum(),
                refresh_key,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        },
    }
    Ok(())
}
