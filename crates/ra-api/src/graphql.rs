//! GraphQL request/response envelopes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One outbound GraphQL operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<V: Serialize> {
    /// The operation name, matching the query document.
    pub operation_name: &'static str,
    /// Operation variables.
    pub variables: V,
    /// The query document.
    pub query: &'static str,
}

/// The standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    /// The operation's data, absent on failure.
    pub data: Option<T>,
    /// GraphQL-level errors, if any.
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One upstream error entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    /// Human-readable message.
    pub message: String,
}

impl<T: DeserializeOwned> GraphQlResponse<T> {
    /// Splits the envelope into data or an error message list.
    pub fn into_result(self) -> std::result::Result<Option<T>, Vec<String>> {
        if self.errors.is_empty() {
            Ok(self.data)
        } else {
            Err(self.errors.into_iter().map(|e| e.message).collect())
        }
    }
}
