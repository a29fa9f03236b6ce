//! Filter plan output formatting.

use owo_colors::OwoColorize;
use ra_filter_rs::{FilterClause, FilterPlan, LogicalJoin};
use serde_json::{json, Value};

use super::helpers::warn_diagnostics;

/// Prints a plan as pretty JSON.
pub fn format_plan_json(plan: &FilterPlan) -> serde_json::Result<()> {
    let client: Vec<Value> = plan.client_clauses().iter().map(clause_json).collect();
    let diagnostics: Vec<String> = plan
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.to_string())
        .collect();
    let output = json!({
        "server": Value::Object(plan.server_clauses_json()),
        "client": client,
        "diagnostics": diagnostics,
        "noop": plan.is_noop(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn clause_json(clause: &FilterClause) -> Value {
    json!({
        "field": clause.field,
        "operator": clause.operator.name(),
        "values": clause.operand_values,
        "join": join_name(clause.join),
    })
}

fn join_name(join: LogicalJoin) -> &'static str {
    match join {
        LogicalJoin::And => "and",
        LogicalJoin::Or => "or",
        LogicalJoin::Not => "not",
    }
}

/// Prints a plan in a human-readable form.
pub fn format_plan_table(plan: &FilterPlan, use_colors: bool) {
    warn_diagnostics(plan.diagnostics(), use_colors);

    if plan.is_noop() {
        println!("Empty plan: everything passes.");
        return;
    }

    let server_header = "Delegated upstream:";
    if use_colors {
        println!("{}", server_header.green().bold());
    } else {
        println!("{server_header}");
    }
    if plan.server_clauses().is_empty() {
        println!("  (nothing)");
    } else {
        for (field, descriptor) in plan.server_clauses() {
            println!("  {field}: {}", descriptor.to_value());
        }
    }

    let client_header = "\nEvaluated locally:";
    if use_colors {
        println!("{}", client_header.yellow().bold());
    } else {
        println!("{client_header}");
    }
    if plan.client_clauses().is_empty() {
        println!("  (nothing)");
    } else {
        for clause in plan.client_clauses() {
            println!(
                "  {} {}:{}:{}",
                join_name(clause.join).to_uppercase(),
                clause.field,
                clause.operator.name(),
                clause.operand_values.join(",")
            );
        }
    }
}
