//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the ra-api
//! crate, making it easy for library consumers to import everything they
//! need with a single use statement.
//!
//! # Example
//!
//! ```
//! use ra_api_rs::prelude::*;
//!
//! // Now you have access to:
//! // - RaClient (API client)
//! // - Error, Result (error handling)
//! // - EventListingsQuery, SortField, FetchedEvents (event listings)
//! // - GlobalSearchQuery (global search)
//! // - EventListing, Event, Venue, Artist, SearchResult (data models)
//! ```

// Client types
pub use crate::client::RaClient;

// Error types
pub use crate::error::{Error, Result};

// Event listings
pub use crate::events::{
    listing_date_bounds, EventListingsQuery, EventsPage, FetchedEvents, SortField,
};

// Global search
pub use crate::search::{group_by_search_type, indices_from_plan, GlobalSearchQuery};

// Data models
pub use crate::models::{Artist, Event, EventListing, Pick, SearchResult, Venue};
