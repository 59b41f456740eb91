//! Listing source - the one external data dependency

mod client;
mod error;

pub use client::{fetch_listings, HttpListingSource, ListingSource, DEFAULT_ENDPOINT};
pub use error::{FetchError, FETCH_FAILED_MESSAGE};
