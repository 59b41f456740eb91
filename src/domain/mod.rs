//! Domain layer - listing models and the search filter
//!
//! Nothing here touches the network or the terminal.

pub mod listing;

pub use listing::{filter_listings, normalize, ListingRecord, Location, SourcePost, PRICE_RANGE};
