//! Global search: query construction and result grouping.
//!
//! Search has no upstream filter input; the only server-side lever is the
//! `indices` variable, which restricts the result types returned. A plan's
//! delegated `type` clause is translated into indices, and everything else
//! runs client-side over the fetched records.

use ra_filter_rs::{FieldProjections, FilterPlan, ServerFilter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::client::RaClient;
use crate::error::Result;
use crate::graphql::GraphQlRequest;

/// Default result cap per search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 16;

/// The search indices the upstream accepts.
pub const VALID_INDICES: [&str; 6] = ["AREA", "ARTIST", "CLUB", "LABEL", "PROMOTER", "EVENT"];

/// The global-search operation.
const GLOBAL_SEARCH_QUERY: &str = r#"query GET_GLOBAL_SEARCH_RESULTS($searchTerm: String!, $indices: [IndexType!], $limit: Int) {
  search(searchTerm: $searchTerm, limit: $limit, indices: $indices, includeNonLive: false) {
    searchType
    id
    value
    areaName
    countryId
    countryName
    countryCode
    contentUrl
    imageUrl
    score
    clubName
    clubContentUrl
    date
    __typename
  }
}"#;

/// Derives the indices to request from a plan's delegated `type` clause.
///
/// A `type:eq:artist` or `type:in:artist,club` clause narrows the search to
/// the named indices; unknown names are dropped. Without a delegated `type`
/// clause, or when nothing valid remains, every index is requested.
pub fn indices_from_plan(plan: &FilterPlan) -> Vec<String> {
    let requested: Vec<String> = match plan.server_clauses().get("type") {
        Some(ServerFilter::Eq(value)) => vec![value.clone()],
        Some(ServerFilter::Any(values)) => values.clone(),
        _ => Vec::new(),
    };
    let indices: Vec<String> = requested
        .iter()
        .map(|value| value.to_uppercase())
        .filter(|value| VALID_INDICES.contains(&value.as_str()))
        .collect();
    if indices.is_empty() {
        VALID_INDICES.iter().map(|index| index.to_string()).collect()
    } else {
        indices
    }
}

/// Groups raw search records by their `searchType`, lowercased.
pub fn group_by_search_type(records: &[Value]) -> BTreeMap<String, Vec<Value>> {
    let mut groups: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for record in records {
        let search_type = record
            .get("searchType")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_lowercase();
        groups.entry(search_type).or_default().push(record.clone());
    }
    groups
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GlobalSearchVariables {
    search_term: String,
    indices: Vec<String>,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct GlobalSearchData {
    #[serde(default)]
    search: Vec<Value>,
}

/// A global-search query for one term.
#[derive(Debug, Clone)]
pub struct GlobalSearchQuery {
    search_term: String,
    limit: u32,
}

impl GlobalSearchQuery {
    /// Creates a search for a term with the default limit.
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Sets the result cap.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Runs the search and applies the plan's client clauses to the results.
    pub async fn fetch(&self, client: &RaClient, plan: &FilterPlan) -> Result<Vec<Value>> {
        let request = GraphQlRequest {
            operation_name: "GET_GLOBAL_SEARCH_RESULTS",
            variables: GlobalSearchVariables {
                search_term: self.search_term.clone(),
                indices: indices_from_plan(plan),
                limit: self.limit,
            },
            query: GLOBAL_SEARCH_QUERY,
        };
        let data: GlobalSearchData = client.post(&request).await?;
        Ok(plan.filter(data.search, &FieldProjections::search_result()))
    }
}
