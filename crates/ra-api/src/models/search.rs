//! Global-search result model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One hit from the global search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The index the hit came from (artist, club, upcomingevent, ...).
    #[serde(default)]
    pub search_type: String,

    #[serde(default)]
    pub id: String,

    /// The hit's display name or title.
    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub area_name: Option<String>,

    #[serde(default)]
    pub country_name: Option<String>,

    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub content_url: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Relevance score.
    #[serde(default)]
    pub score: Option<f64>,

    /// Venue name, for event hits.
    #[serde(default)]
    pub club_name: Option<String>,

    /// Event date, for event hits.
    #[serde(default)]
    pub date: Option<String>,
}

impl SearchResult {
    /// Deserializes a hit from an opaque record.
    pub fn from_record(record: &Value) -> Option<Self> {
        serde_json::from_value(record.clone()).ok()
    }
}
