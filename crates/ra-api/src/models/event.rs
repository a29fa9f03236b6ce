//! Event-listing models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of an event-listings page: the listing envelope plus the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListing {
    /// The listing id.
    #[serde(default)]
    pub id: String,

    /// The date the event is listed under.
    #[serde(default)]
    pub listing_date: Option<String>,

    /// The event itself.
    pub event: Event,
}

/// An event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// The unique identifier.
    #[serde(default)]
    pub id: String,

    /// The event title.
    #[serde(default)]
    pub title: String,

    /// The event date.
    #[serde(default)]
    pub date: Option<String>,

    /// Start time, when announced.
    #[serde(default)]
    pub start_time: Option<String>,

    /// The ra.co content path.
    #[serde(default)]
    pub content_url: Option<String>,

    /// How many users marked interest.
    #[serde(default)]
    pub interested_count: Option<i64>,

    /// Whether tickets are sold through the platform.
    #[serde(default)]
    pub is_ticketed: bool,

    /// The venue, when published.
    #[serde(default)]
    pub venue: Option<Venue>,

    /// The billed artists.
    #[serde(default)]
    pub artists: Vec<Artist>,

    /// Editorial pick metadata, when the event was picked.
    #[serde(default)]
    pub pick: Option<Pick>,
}

/// A venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub content_url: Option<String>,
}

/// An artist on an event's bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,
}

/// Editorial pick metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub blurb: Option<String>,
}

impl EventListing {
    /// Deserializes a listing from an opaque record, tolerating extra
    /// fields. Returns None when the record has no event object.
    pub fn from_record(record: &Value) -> Option<Self> {
        serde_json::from_value(record.clone()).ok()
    }
}
