//! Resident Advisor GraphQL client library
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use ra_api_rs::prelude::*;
//! ```
//!
//! This re-exports the most commonly used types including [`RaClient`],
//! error types, the event-listings and global-search queries, and data
//! models. Fetched records stay as raw JSON so filter expressions see every
//! field the upstream returns; the typed models exist for rendering.

pub mod client;
pub mod error;
pub mod events;
pub mod graphql;
pub mod models;
pub mod prelude;
pub mod search;
