//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - the HTTP listing source built on reqwest
//! - Tokio runtime bridge for async operations

pub mod listings;
pub mod runtime;

pub use listings::{HttpListingSource, ListingSource};
pub use runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
