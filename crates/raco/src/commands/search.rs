//! Search command implementation.
//!
//! Runs a global search and applies the filter expression's client-side
//! clauses to the results.

use ra_api_rs::client::RaClient;
use ra_api_rs::search::GlobalSearchQuery;
use ra_filter_rs::FilterPlan;

use super::{CommandContext, Result};
use crate::output::{format_search_json, format_search_table, warn_diagnostics};

/// Options for the search command.
#[derive(Debug)]
pub struct SearchOptions {
    /// Search term.
    pub query: String,
    /// Filter expression.
    pub filter: Option<String>,
    /// Limit results.
    pub limit: u32,
}

/// Executes the search command.
pub async fn execute(ctx: &CommandContext, opts: &SearchOptions) -> Result<()> {
    let plan = FilterPlan::parse(opts.filter.as_deref());
    if !ctx.quiet {
        warn_diagnostics(plan.diagnostics(), ctx.use_colors);
    }

    let client = RaClient::new();
    let records = GlobalSearchQuery::new(&opts.query)
        .limit(opts.limit)
        .fetch(&client, &plan)
        .await?;

    if ctx.json_output {
        format_search_json(&records)?;
    } else if !ctx.quiet {
        format_search_table(&records, ctx.use_colors);
    }

    Ok(())
}
