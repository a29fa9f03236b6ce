//! Events command implementation.
//!
//! Fetches upcoming event listings for an area and applies the filter
//! expression's client-side clauses locally.

use std::time::Duration;

use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use ra_api_rs::client::RaClient;
use ra_api_rs::events::{listing_date_bounds, EventListingsQuery};
use ra_filter_rs::FilterPlan;

use super::config::load_config;
use super::{CommandContext, CommandError, Result};
use crate::cli::SortField;
use crate::output::{format_events_json, format_events_table, warn_diagnostics};

/// Default width of the date window in days.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Options for the events command.
#[derive(Debug)]
pub struct EventsOptions {
    /// Area ID; falls back to the config default.
    pub area: Option<u64>,
    /// Start of the date window (YYYY-MM-DD).
    pub from: Option<String>,
    /// End of the date window (YYYY-MM-DD).
    pub to: Option<String>,
    /// Filter expression.
    pub filter: Option<String>,
    /// Single-genre shorthand.
    pub genre: Option<String>,
    /// Event type filter.
    pub event_type: Option<String>,
    /// Sort field.
    pub sort: Option<SortField>,
    /// Limit displayed results.
    pub limit: usize,
    /// Show everything.
    pub all: bool,
}

/// Executes the events command.
///
/// # Errors
///
/// Returns an error if a date flag does not parse, or if fetching fails.
pub async fn execute(ctx: &CommandContext, opts: &EventsOptions) -> Result<()> {
    let config = load_config()?;
    let area = opts.area.unwrap_or_else(|| config.area());

    let today = Local::now().date_naive();
    let from = parse_date(opts.from.as_deref(), today)?;
    let to = parse_date(
        opts.to.as_deref(),
        from + ChronoDuration::days(DEFAULT_WINDOW_DAYS),
    )?;
    if to < from {
        return Err(CommandError::Input(format!(
            "--to ({to}) is before --from ({from})"
        )));
    }
    let (gte, lte) = listing_date_bounds(from, to);

    let plan = FilterPlan::parse(opts.filter.as_deref());
    if !ctx.quiet {
        warn_diagnostics(plan.diagnostics(), ctx.use_colors);
    }
    if ctx.verbose {
        eprintln!(
            "Querying area {} from {} to {} ({} delegated, {} local clauses)",
            area,
            from,
            to,
            plan.server_clauses().len(),
            plan.client_clauses().len()
        );
    }

    let mut query = EventListingsQuery::new(area, gte).until(lte);
    if let Some(genre) = &opts.genre {
        query = query.genre(genre.clone());
    }
    if let Some(event_type) = &opts.event_type {
        query = query.event_type(event_type.clone());
    }
    if let Some(sort) = opts.sort {
        query = query.sort(sort.to_query_sort());
    }
    if let Some(page_size) = config.page_size {
        query = query.page_size(page_size);
    }
    if let Some(delay_ms) = config.page_delay_ms {
        query = query.page_delay(Duration::from_millis(delay_ms));
    }

    let client = RaClient::new();
    let mut fetched = query.fetch_all(&client, &plan).await?;

    if !opts.all && fetched.records.len() > opts.limit {
        fetched.records.truncate(opts.limit);
    }

    if ctx.json_output {
        format_events_json(&fetched)?;
    } else if !ctx.quiet {
        format_events_table(&fetched, ctx.use_colors);
    }

    Ok(())
}

/// Parses a YYYY-MM-DD flag, defaulting when absent.
fn parse_date(flag: Option<&str>, default: NaiveDate) -> Result<NaiveDate> {
    match flag {
        None => Ok(default),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| CommandError::Input(format!("invalid date '{raw}', expected YYYY-MM-DD"))),
    }
}
