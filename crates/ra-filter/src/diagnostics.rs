//! Non-fatal anomalies collected while parsing an expression.
//!
//! The DSL never fails on malformed input; a bad clause degrades to "no
//! effect" and the anomaly is recorded here so callers can surface it.

use crate::ast::OPERATOR_NAMES;

/// Minimum Jaro-Winkler similarity for an operator suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A parse-level anomaly. Collected, never raised.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseDiagnostic {
    /// A clause without the two `:` separators; the clause was dropped.
    MalformedClause {
        /// The raw clause text.
        clause: String,
    },

    /// An operator token outside the fixed set; the clause passes every
    /// record.
    UnknownOperator {
        /// The unrecognized token.
        operator: String,
        /// The closest known operator, if any is close enough.
        suggestion: Option<String>,
    },

    /// A `between` clause with fewer than two operands; it matches nothing.
    BetweenArity {
        /// The field the clause targets.
        field: String,
        /// How many operands were supplied.
        got: usize,
    },
}

impl std::fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseDiagnostic::MalformedClause { clause } => {
                write!(f, "malformed clause `{clause}`: expected field:operator:value")
            }
            ParseDiagnostic::UnknownOperator {
                operator,
                suggestion,
            } => match suggestion {
                Some(s) => write!(f, "unknown operator `{operator}` (did you mean `{s}`?)"),
                None => write!(f, "unknown operator `{operator}`"),
            },
            ParseDiagnostic::BetweenArity { field, got } => {
                write!(f, "`{field}:between` needs 2 values, got {got}")
            }
        }
    }
}

impl std::error::Error for ParseDiagnostic {}

/// Finds the closest known operator token to an unrecognized one.
pub(crate) fn suggest_operator(token: &str) -> Option<String> {
    OPERATOR_NAMES
        .iter()
        .map(|known| (*known, strsim::jaro_winkler(token, known)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(known, _)| known.to_string())
}
