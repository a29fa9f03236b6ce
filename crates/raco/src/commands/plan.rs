//! Plan command implementation.
//!
//! Parses a filter expression without fetching anything, showing which
//! clauses will be delegated upstream and which will run locally.

use ra_filter_rs::FilterPlan;

use super::{CommandContext, Result};
use crate::output::{format_plan_json, format_plan_table};

/// Executes the plan command.
pub fn execute(ctx: &CommandContext, expression: &str) -> Result<()> {
    let plan = FilterPlan::parse(Some(expression));

    if ctx.json_output {
        format_plan_json(&plan)?;
    } else if !ctx.quiet {
        format_plan_table(&plan, ctx.use_colors);
    }

    Ok(())
}
