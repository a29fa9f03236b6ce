//! Output formatting utilities for the raco CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`events`] - Event listing output formatting
//! - [`search`] - Global search output formatting
//! - [`plan`] - Filter plan output formatting
//! - [`helpers`] - Common formatting utilities (truncation, diagnostics)

mod events;
pub mod helpers;
mod plan;
mod search;

// Re-export all public functions from submodules

// Events
pub use events::{format_events_json, format_events_table};

// Search
pub use search::{format_search_json, format_search_table};

// Plan
pub use plan::{format_plan_json, format_plan_table};

// Helpers
pub use helpers::warn_diagnostics;
