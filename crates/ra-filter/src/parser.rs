//! Parser for filter expressions.
//!
//! Splits an expression on whitespace-delimited literal `AND`/`OR`/`NOT`
//! tokens, parses each `field:operator:value[,value...]` clause, and
//! classifies it for server or client evaluation. Parsing never fails;
//! anomalies become [`ParseDiagnostic`]s.

use std::collections::BTreeMap;

use crate::ast::{FilterClause, LogicalJoin, Operator, Placement, ServerCapabilities};
use crate::diagnostics::{suggest_operator, ParseDiagnostic};
use crate::plan::ServerFilter;

/// Output of parsing one expression string.
#[derive(Debug, Default)]
pub(crate) struct ParsedExpression {
    pub server: BTreeMap<String, ServerFilter>,
    pub client: Vec<FilterClause>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Parses an expression into server descriptors and client clauses.
pub(crate) fn parse_expression(input: &str, capabilities: &ServerCapabilities) -> ParsedExpression {
    let mut parsed = ParsedExpression::default();
    let segments = split_on_joins(input);

    // An OR anywhere disables delegation for the whole expression: the
    // upstream combines its filters conjunctively, and the fold makes every
    // preceding clause part of the OR's left arm, so delegating any clause
    // would drop records the other arm accepts.
    let has_or = segments
        .iter()
        .any(|(join, _)| *join == LogicalJoin::Or);

    for (join, clause) in &segments {
        parse_clause(clause, *join, has_or, capabilities, &mut parsed);
    }

    parsed
}

/// Splits the expression on whitespace-delimited `AND`/`OR`/`NOT` tokens
/// into (join, clause-text) pairs. The first clause implicitly joins with
/// `AND`; a leading or doubled join token sets the mode of the clause that
/// follows it.
fn split_on_joins(input: &str) -> Vec<(LogicalJoin, String)> {
    let mut segments = Vec::new();
    let mut join = LogicalJoin::And;
    let mut buffer = String::new();

    for token in input.split_whitespace() {
        match logical_join(token) {
            Some(next_join) => {
                if !buffer.is_empty() {
                    segments.push((join, std::mem::take(&mut buffer)));
                }
                join = next_join;
            }
            None => {
                // Clause values may contain spaces; rejoin with a single
                // space, which trimming and normalization make equivalent.
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                buffer.push_str(token);
            }
        }
    }

    if !buffer.is_empty() {
        segments.push((join, buffer));
    }

    segments
}

/// Maps a literal `AND`/`OR`/`NOT` token to its join mode.
fn logical_join(token: &str) -> Option<LogicalJoin> {
    match token {
        "AND" => Some(LogicalJoin::And),
        "OR" => Some(LogicalJoin::Or),
        "NOT" => Some(LogicalJoin::Not),
        _ => None,
    }
}

/// Parses one clause and routes it to the server map or the client list.
fn parse_clause(
    raw: &str,
    join: LogicalJoin,
    or_in_expression: bool,
    capabilities: &ServerCapabilities,
    parsed: &mut ParsedExpression,
) {
    let mut parts = raw.splitn(3, ':');
    let (field, operator_token, values) = match (parts.next(), parts.next(), parts.next()) {
        (Some(field), Some(op), Some(values)) if !field.trim().is_empty() => {
            (field.trim(), op.trim().to_lowercase(), values)
        }
        _ => {
            parsed.diagnostics.push(ParseDiagnostic::MalformedClause {
                clause: raw.to_string(),
            });
            return;
        }
    };

    let operator = Operator::parse(&operator_token);
    if let Operator::Other(token) = &operator {
        parsed.diagnostics.push(ParseDiagnostic::UnknownOperator {
            operator: token.clone(),
            suggestion: suggest_operator(token),
        });
    }

    let operand_values: Vec<String> = values
        .split(',')
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();

    if operator == Operator::Between && operand_values.len() < 2 {
        parsed.diagnostics.push(ParseDiagnostic::BetweenArity {
            field: field.to_string(),
            got: operand_values.len(),
        });
    }

    let delegable = join == LogicalJoin::And && !or_in_expression;
    if let Some(descriptor) = delegable
        .then(|| server_descriptor(&operator, &operator_token, &operand_values, capabilities))
        .flatten()
    {
        // Later clauses on the same field overwrite earlier descriptors:
        // the upstream accepts at most one descriptor per field, so the
        // merge policy is last write wins.
        parsed.server.insert(field.to_string(), descriptor);
        return;
    }

    parsed.client.push(FilterClause {
        field: field.to_string(),
        operator,
        operand_values,
        join,
        placement: Placement::Client,
    });
}

/// Builds the upstream filter descriptor for a delegable clause.
///
/// A clause gets a descriptor only when the capability set names its
/// operator token, the operator has a descriptor shape, and it has at least
/// one operand. (Join eligibility is checked by the caller: `NOT` clauses,
/// and every clause of an expression containing an `OR`, stay client-side,
/// since the upstream combines its filters conjunctively.)
fn server_descriptor(
    operator: &Operator,
    operator_token: &str,
    operands: &[String],
    capabilities: &ServerCapabilities,
) -> Option<ServerFilter> {
    if operands.is_empty() || !capabilities.supports(operator_token) {
        return None;
    }

    // The scalar descriptors carry exactly one value. A multi-operand `eq`
    // means "equals any of these" client-side, which no scalar descriptor
    // expresses, so such clauses are not delegated.
    match operator {
        Operator::Eq if operands.len() == 1 => Some(ServerFilter::Eq(operands[0].clone())),
        Operator::Ne if operands.len() == 1 => Some(ServerFilter::Ne(operands[0].clone())),
        Operator::AnyOf => Some(ServerFilter::Any(operands.to_vec())),
        Operator::Gte if operands.len() == 1 => Some(ServerFilter::Gte(operands[0].clone())),
        Operator::Lte if operands.len() == 1 => Some(ServerFilter::Lte(operands[0].clone())),
        _ => None,
    }
}
