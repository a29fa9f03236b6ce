//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the raco CLI.

use clap::{Parser, Subcommand, ValueEnum};

/// raco - A Rust CLI for the Resident Advisor GraphQL API
#[derive(Parser, Debug)]
#[command(name = "raco")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List upcoming events for an area
    #[command(alias = "e")]
    Events {
        /// Area ID (default: from config)
        #[arg(short, long)]
        area: Option<u64>,

        /// Start of the date window, YYYY-MM-DD (default: today)
        #[arg(long)]
        from: Option<String>,

        /// End of the date window, YYYY-MM-DD (default: one week out)
        #[arg(long)]
        to: Option<String>,

        /// Filter expression (e.g., "genre:contains_any:techno,house AND artists:has:kobosil")
        #[arg(short, long)]
        filter: Option<String>,

        /// Filter by a single genre (shorthand for genre:eq:<value>)
        #[arg(short, long)]
        genre: Option<String>,

        /// Filter by event type (e.g., club, festival)
        #[arg(short = 't', long)]
        event_type: Option<String>,

        /// Sort by field
        #[arg(long, value_enum)]
        sort: Option<SortField>,

        /// Limit displayed results (default: 50)
        #[arg(long, default_value = "50")]
        limit: usize,

        /// Show all matching events (no limit)
        #[arg(long)]
        all: bool,
    },

    /// Search artists, clubs, labels, promoters, areas and events
    #[command(alias = "s")]
    Search {
        /// Search term
        query: String,

        /// Filter expression (e.g., "type:eq:artist AND country:eq:de")
        #[arg(short, long)]
        filter: Option<String>,

        /// Limit results (default: 16)
        #[arg(long, default_value = "16")]
        limit: u32,
    },

    /// Explain how a filter expression splits between server and client
    Plan {
        /// Filter expression to analyze
        expression: String,
    },

    /// View configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sort fields for event listings.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortField {
    /// Sort by listing date (default)
    Date,
    /// Sort by relevance score
    Score,
    /// Sort by title
    Title,
}

impl SortField {
    /// The corresponding query sort preset.
    pub fn to_query_sort(self) -> ra_api_rs::events::SortField {
        match self {
            SortField::Date => ra_api_rs::events::SortField::ListingDate,
            SortField::Score => ra_api_rs::events::SortField::Score,
            SortField::Title => ra_api_rs::events::SortField::Title,
        }
    }
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_events_parses_filter_flag() {
        let cli = Cli::try_parse_from([
            "raco",
            "events",
            "--area",
            "13",
            "-f",
            "genre:contains_any:techno,house",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Events { area, filter, .. }) => {
                assert_eq!(area, Some(13));
                assert_eq!(filter.as_deref(), Some("genre:contains_any:techno,house"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["raco", "-v", "-q", "plan", "x:eq:y"]).is_err());
    }
}
