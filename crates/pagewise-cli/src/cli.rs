//! # CLI Structure and Argument Parsing
//!
//! `pagewise` drives a page loader the way a list UI would: an initial load,
//! appends along `next_key`, and an optional refresh from a resolved key.
//!
//! ```bash
//! # Page GitHub repository search
//! pagewise search android --pages 3
//!
//! # Page the generated article feed without simulated latency
//! pagewise articles --pages 4 --no-delay
//!
//! # Reload the window from the page under position 45
//! pagewise articles --pages 5 --refresh-at 45 --format json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI structure for the `pagewise` command
#[derive(Parser, Clone, Debug)]
#[command(name = "pagewise")]
#[command(version)]
#[command(about = "pagewise - drive keyed page loaders from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Page through GitHub repositories matching a query
    Search {
        /// Text to search for
        query: String,

        /// API root to send requests to
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Page through the generated article feed
    Articles {
        /// Skip the simulated load latency
        #[arg(long)]
        no_delay: bool,

        #[command(flatten)]
        paging: PagingArgs,
    },
}

/// Paging options shared by every command.
#[derive(Args, Clone, Debug)]
pub struct PagingArgs {
    /// Number of pages to load, the initial load included
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Items per append (the initial load is three times larger)
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// After loading, rebuild the window from the page under this position
    #[arg(long, value_name = "POSITION")]
    pub refresh_at: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per item
    Text,
    /// Pages and keys as JSON
    Json,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::try_parse_from([
            "pagewise",
            "search",
            "android",
            "--pages",
            "2",
            "--api-url",
            "http://localhost:1",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                query,
                api_url,
                paging,
            } => {
                assert_eq!(query, "android");
                assert_eq!(api_url.as_deref(), Some("http://localhost:1"));
                assert_eq!(paging.pages, 2);
                assert_eq!(paging.format, OutputFormat::Text);
            },
            Commands::Articles { .. } => panic!("expected search"),
        }
    }

    #[test]
    fn test_zero_pages_rejected() {
        assert!(Cli::try_parse_from(["pagewise", "articles", "--pages", "0"]).is_err());
        assert!(Cli::try_parse_from(["pagewise", "articles", "--page-size", "0"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["pagewise", "articles", "--no-delay", "-v", "-f", "json"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Articles { no_delay, paging } => {
                assert!(no_delay);
                assert_eq!(paging.format, OutputFormat::Json);
            },
            Commands::Search { .. } => panic!("expected articles"),
        }
    }
}
