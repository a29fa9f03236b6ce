//! Filter-expression engine for Resident Advisor queries.
//!
//! This crate parses the `field:operator:value[,value...]` query-string DSL
//! into an immutable [`FilterPlan`]. Each clause is classified once, at parse
//! time, as either *server-delegable* (expressible as an upstream GraphQL
//! filter descriptor) or *client-evaluable* (checked in-process against
//! already-fetched records).
//!
//! # Supported Syntax
//!
//! ```text
//! field:operator:value[,value...][ (AND|OR|NOT) field:operator:value[,value...]]*
//! ```
//!
//! ## Operators
//! - `eq`, `ne` - equality (case/whitespace-insensitive)
//! - `in`, `any`, `contains_any` - record has ANY of the values
//! - `nin`, `contains_none` - record has NONE of the values
//! - `all`, `contains_all` - record has ALL of the values
//! - `has` - value appears as an element of, or substring within, the record
//! - `starts`, `ends` - prefix / suffix match
//! - `gt`, `lt`, `gte`, `lte`, `between` - numeric comparisons
//!
//! Malformed input never fails: unparseable clauses are dropped and unknown
//! operators pass every record, with the anomaly reported through
//! [`FilterPlan::diagnostics`] instead of an error.
//!
//! # Example
//!
//! ```
//! use ra_filter_rs::{FieldProjections, FilterPlan};
//! use serde_json::json;
//!
//! let plan = FilterPlan::parse(Some("genre:contains_any:techno,house AND artists:has:charlotte"));
//!
//! // `contains_any` and `has` cannot be delegated upstream.
//! assert!(plan.server_clauses().is_empty());
//! assert_eq!(plan.client_clauses().len(), 2);
//!
//! let records = vec![
//!     json!({"event": {"genre": ["techno"], "artists": [{"name": "Charlotte de Witte"}]}}),
//!     json!({"event": {"genre": ["jazz"], "artists": [{"name": "Someone Else"}]}}),
//! ];
//! let projections = FieldProjections::event_listing();
//! let kept = plan.filter(records, &projections);
//! assert_eq!(kept.len(), 1);
//! ```

mod ast;
mod diagnostics;
mod evaluator;
mod extract;
mod parser;
mod plan;

pub use ast::{FilterClause, LogicalJoin, Operator, Placement, ServerCapabilities};
pub use diagnostics::ParseDiagnostic;
pub use extract::{FieldProjections, Projection};
pub use plan::{FilterPlan, ServerFilter};


#[cfg(test)]
mod evaluator_tests;
