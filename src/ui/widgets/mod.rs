pub mod listing_card;

pub use listing_card::{ListingCard, CARD_HEIGHT};
