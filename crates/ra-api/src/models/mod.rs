//! Typed display models.
//!
//! Fetched records stay opaque JSON so the filter engine can project
//! arbitrary fields out of them; these models exist for rendering only and
//! deserialize permissively from a record.

mod event;
mod search;

pub use event::{Artist, Event, EventListing, Pick, Venue};
pub use search::SearchResult;
