//! Clause evaluation against extracted record values.
//!
//! Implements the boolean semantics of every operator. Record values are
//! lowercased and trimmed before text comparisons; numeric operators parse
//! both sides as `f64` and evaluate false (never panic) on non-numeric
//! input.

use crate::ast::{FilterClause, Operator};

/// Evaluates one clause against the value sequence extracted for its field.
pub(crate) fn clause_matches(clause: &FilterClause, extracted: &[String]) -> bool {
    // Unknown operators pass everything, as if the clause were absent.
    if let Operator::Other(_) = clause.operator {
        return true;
    }

    let values: Vec<String> = extracted
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();
    let operands = &clause.operand_values;

    if values.is_empty() {
        // A record with no values vacuously "contains none" of the operands;
        // every other operator (ne included) fails on an absent field.
        return clause.operator == Operator::NoneOf;
    }

    match &clause.operator {
        Operator::Eq => values.iter().any(|v| operands.iter().any(|o| v == o)),
        Operator::Ne => !values.iter().any(|v| operands.iter().any(|o| v == o)),
        Operator::AnyOf => operands.iter().any(|o| has_value(&values, o)),
        Operator::NoneOf => !operands.iter().any(|o| has_value(&values, o)),
        Operator::AllOf => operands.iter().all(|o| has_value(&values, o)),
        Operator::Has => operands.iter().any(|o| has_value(&values, o)),
        Operator::Starts => values
            .iter()
            .any(|v| operands.iter().any(|o| v.starts_with(o.as_str()))),
        Operator::Ends => values
            .iter()
            .any(|v| operands.iter().any(|o| v.ends_with(o.as_str()))),
        Operator::Gt => compare_first(&values, operands, |v, bound| v > bound),
        Operator::Lt => compare_first(&values, operands, |v, bound| v < bound),
        Operator::Gte => compare_first(&values, operands, |v, bound| v >= bound),
        Operator::Lte => compare_first(&values, operands, |v, bound| v <= bound),
        Operator::Between => between(&values, operands),
        Operator::Other(_) => true,
    }
}

/// True if the operand is an exact element of, or a substring within, any
/// record value. The membership operators (`in`/`any`/`contains_*`/`has`)
/// are all defined through this one predicate, which makes `contains_all`
/// decompose into per-value `has` checks and keeps `contains_none` the
/// exact negation of `contains_any`.
fn has_value(values: &[String], operand: &str) -> bool {
    values.iter().any(|v| v.contains(operand))
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Compares any numeric record value against the first operand.
fn compare_first(values: &[String], operands: &[String], cmp: fn(f64, f64) -> bool) -> bool {
    let Some(bound) = operands.first().and_then(|o| parse_number(o)) else {
        return false;
    };
    values
        .iter()
        .filter_map(|v| parse_number(v))
        .any(|v| cmp(v, bound))
}

/// Inclusive range check over the first two operands.
fn between(values: &[String], operands: &[String]) -> bool {
    let (Some(lo), Some(hi)) = (
        operands.first().and_then(|o| parse_number(o)),
        operands.get(1).and_then(|o| parse_number(o)),
    ) else {
        return false;
    };
    values
        .iter()
        .filter_map(|v| parse_number(v))
        .any(|v| v >= lo && v <= hi)
}
