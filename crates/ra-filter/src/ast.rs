//! Clause-level types for parsed filter expressions.

use std::collections::HashSet;

/// Every operator token the DSL recognizes, used for "did you mean"
/// suggestions on unknown operators.
pub(crate) const OPERATOR_NAMES: &[&str] = &[
    "eq",
    "ne",
    "in",
    "nin",
    "any",
    "all",
    "contains_all",
    "contains_any",
    "contains_none",
    "has",
    "starts",
    "ends",
    "gt",
    "lt",
    "gte",
    "lte",
    "between",
];

/// A filter operator, with textual aliases folded to one canonical variant.
///
/// `in`, `any` and `contains_any` all mean "record has any of the values";
/// `nin` and `contains_none` mean the exact negation; `all` is shorthand for
/// `contains_all`. Tokens outside the fixed set parse to [`Operator::Other`],
/// which passes every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    /// Exact equality against any operand.
    Eq,

    /// No record value equals any operand.
    Ne,

    /// Record has ANY of the operands (`in` / `any` / `contains_any`).
    AnyOf,

    /// Record has NONE of the operands (`nin` / `contains_none`).
    NoneOf,

    /// Record has ALL of the operands (`all` / `contains_all`).
    AllOf,

    /// Operand appears as an element of, or substring within, the record.
    Has,

    /// Prefix match.
    Starts,

    /// Suffix match.
    Ends,

    /// Numeric greater-than.
    Gt,

    /// Numeric less-than.
    Lt,

    /// Numeric greater-or-equal.
    Gte,

    /// Numeric less-or-equal.
    Lte,

    /// Inclusive numeric range over the first two operands.
    Between,

    /// Unrecognized operator token; evaluates permissively (always true).
    Other(String),
}

impl Operator {
    /// Parses an operator token (already trimmed and lowercased).
    pub fn parse(token: &str) -> Self {
        match token {
            "eq" => Operator::Eq,
            "ne" => Operator::Ne,
            "in" | "any" | "contains_any" => Operator::AnyOf,
            "nin" | "contains_none" => Operator::NoneOf,
            "all" | "contains_all" => Operator::AllOf,
            "has" => Operator::Has,
            "starts" => Operator::Starts,
            "ends" => Operator::Ends,
            "gt" => Operator::Gt,
            "lt" => Operator::Lt,
            "gte" => Operator::Gte,
            "lte" => Operator::Lte,
            "between" => Operator::Between,
            other => Operator::Other(other.to_string()),
        }
    }

    /// Returns the canonical name for the operator.
    pub fn name(&self) -> &str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::AnyOf => "any",
            Operator::NoneOf => "contains_none",
            Operator::AllOf => "contains_all",
            Operator::Has => "has",
            Operator::Starts => "starts",
            Operator::Ends => "ends",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Between => "between",
            Operator::Other(name) => name,
        }
    }

    /// Returns true if the token was a recognized operator.
    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Other(_))
    }
}

/// How a clause combines with the accumulated result of the clauses before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalJoin {
    /// Logical AND (the default, and the implicit join of the first clause).
    #[default]
    And,

    /// Logical OR.
    Or,

    /// AND with the clause's negation.
    Not,
}

/// Where a clause is evaluated, decided once at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Delegated to the upstream query as a filter descriptor.
    Server,

    /// Evaluated in-process against fetched records.
    Client,
}

/// One parsed `field:operator:value[,value...]` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    /// Name of the record attribute being tested.
    pub field: String,

    /// The operator.
    pub operator: Operator,

    /// Comma-split right-hand side, trimmed and lowercased, empties removed.
    pub operand_values: Vec<String>,

    /// How this clause joins with the previous ones.
    pub join: LogicalJoin,

    /// Server or client evaluation.
    pub placement: Placement,
}

/// The set of operator tokens the upstream query API can evaluate directly.
///
/// Delegation eligibility is data, not code: the upstream capability set has
/// changed over time, so callers can widen or replace the default without
/// touching the parser.
#[derive(Debug, Clone)]
pub struct ServerCapabilities {
    operators: HashSet<String>,
}

impl ServerCapabilities {
    /// The baseline capability set: `eq` plus the `in`/`any` aliases.
    pub fn standard() -> Self {
        Self::from_operators(["eq", "in", "any"])
    }

    /// A wider set one upstream evolution supported: adds `ne`, `gte`, `lte`.
    pub fn extended() -> Self {
        Self::from_operators(["eq", "in", "any", "ne", "gte", "lte"])
    }

    /// Builds a capability set from operator tokens.
    pub fn from_operators<I, S>(operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operators: operators.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the upstream can evaluate this operator token.
    pub fn supports(&self, operator: &str) -> bool {
        self.operators.contains(operator)
    }
}

impl Default for ServerCapabilities {
    fn default() -> Self {
        Self::standard()
    }
}
