//! The parsed, classified, immutable result of one filter expression.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::ast::{FilterClause, LogicalJoin, ServerCapabilities};
use crate::diagnostics::ParseDiagnostic;
use crate::evaluator::clause_matches;
use crate::extract::FieldProjections;
use crate::parser::parse_expression;

/// An upstream filter descriptor for one field.
///
/// Serializes to the exact shape the upstream query accepts:
/// `{"eq": "techno"}`, `{"any": ["techno", "house"]}`, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerFilter {
    /// `{"eq": value}`
    Eq(String),
    /// `{"ne": value}`
    Ne(String),
    /// `{"any": [values...]}`
    Any(Vec<String>),
    /// `{"gte": value}`
    Gte(String),
    /// `{"lte": value}`
    Lte(String),
}

impl ServerFilter {
    /// The descriptor as a JSON value, for merging into an outbound payload.
    pub fn to_value(&self) -> Value {
        // Serialization of these variants cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A parsed filter expression, split into a server-delegable portion and an
/// ordered list of client-evaluable clauses.
///
/// Built once from a string; immutable thereafter. One plan is reused for
/// every page of a paginated query, and may be evaluated concurrently from
/// multiple threads.
#[derive(Debug, Clone, Default)]
pub struct FilterPlan {
    server: BTreeMap<String, ServerFilter>,
    client: Vec<FilterClause>,
    diagnostics: Vec<ParseDiagnostic>,
}

impl FilterPlan {
    /// Parses an expression with the standard server capability set.
    ///
    /// Never fails: `None`, empty strings and malformed clauses all produce
    /// a plan (possibly a no-op one), with anomalies available through
    /// [`diagnostics`](Self::diagnostics).
    pub fn parse(expression: Option<&str>) -> Self {
        Self::parse_with_capabilities(expression, &ServerCapabilities::standard())
    }

    /// Parses an expression against a specific server capability set.
    pub fn parse_with_capabilities(
        expression: Option<&str>,
        capabilities: &ServerCapabilities,
    ) -> Self {
        let Some(expression) = expression else {
            return Self::default();
        };
        let parsed = parse_expression(expression, capabilities);
        Self {
            server: parsed.server,
            client: parsed.client,
            diagnostics: parsed.diagnostics,
        }
    }

    /// The server-delegable portion: at most one descriptor per field.
    pub fn server_clauses(&self) -> &BTreeMap<String, ServerFilter> {
        &self.server
    }

    /// The server clauses as a JSON object, ready to merge into an outbound
    /// query's filter map.
    pub fn server_clauses_json(&self) -> serde_json::Map<String, Value> {
        self.server
            .iter()
            .map(|(field, descriptor)| (field.clone(), descriptor.to_value()))
            .collect()
    }

    /// The clauses that must be evaluated against fetched records, in
    /// expression order.
    pub fn client_clauses(&self) -> &[FilterClause] {
        &self.client
    }

    /// Anomalies collected while parsing.
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    /// True if the plan constrains nothing on either side.
    pub fn is_noop(&self) -> bool {
        self.server.is_empty() && self.client.is_empty()
    }

    /// True if any clause needs in-process evaluation.
    pub fn has_client_clauses(&self) -> bool {
        !self.client.is_empty()
    }

    /// Evaluates the client clauses against one record.
    ///
    /// Clauses fold left to right from a `true` accumulator: `AND` takes the
    /// logical and, `OR` the logical or, and `NOT` ands the clause's
    /// negation. A record with no client clauses always passes.
    pub fn matches(&self, record: &Value, projections: &FieldProjections) -> bool {
        let mut acc = true;
        for clause in &self.client {
            let values = projections.extract(record, &clause.field);
            let hit = clause_matches(clause, &values);
            acc = match clause.join {
                LogicalJoin::And => acc && hit,
                LogicalJoin::Or => acc || hit,
                LogicalJoin::Not => acc && !hit,
            };
        }
        acc
    }

    /// Filters owned records, keeping those the client clauses accept.
    pub fn filter(&self, mut records: Vec<Value>, projections: &FieldProjections) -> Vec<Value> {
        if self.client.is_empty() {
            return records;
        }
        records.retain(|record| self.matches(record, projections));
        records
    }

    /// Filters borrowed records, returning references to the matches.
    pub fn filter_refs<'a>(
        &self,
        records: &'a [Value],
        projections: &FieldProjections,
    ) -> Vec<&'a Value> {
        records
            .iter()
            .filter(|record| self.matches(record, projections))
            .collect()
    }
}
