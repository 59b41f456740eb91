//! Listing records and the search filter applied to them

use std::fmt;
use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

/// Synthesized prices are drawn uniformly from this range
pub const PRICE_RANGE: RangeInclusive<u32> = 50..=549;

/// Places a listing can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Lagos,
    Abuja,
    PortHarcourt,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Lagos, Location::Abuja, Location::PortHarcourt];

    pub fn name(&self) -> &'static str {
        match self {
            Location::Lagos => "Lagos",
            Location::Abuja => "Abuja",
            Location::PortHarcourt => "Port Harcourt",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Item as returned by the remote listing source. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePost {
    pub id: u64,
    pub title: String,
}

/// Normalized listing shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub id: u64,
    pub title: String,
    pub price: u32,
    pub location: Location,
}

impl ListingRecord {
    /// Build a record from a source item, synthesizing price and location from `rng`
    pub fn from_post<R: Rng + ?Sized>(post: SourcePost, rng: &mut R) -> Self {
        let price = rng.gen_range(PRICE_RANGE);
        let location = *Location::ALL
            .choose(rng)
            .unwrap_or(&Location::Lagos);
        Self {
            id: post.id,
            title: post.title,
            price,
            location,
        }
    }
}

/// Turn a fetched payload into listing records, preserving order
pub fn normalize<R: Rng + ?Sized>(posts: Vec<SourcePost>, rng: &mut R) -> Vec<ListingRecord> {
    posts
        .into_iter()
        .map(|post| ListingRecord::from_post(post, rng))
        .collect()
}

/// Records whose title contains `query`, ignoring case, in original order.
/// An empty query keeps everything.
pub fn filter_listings<'a>(listings: &'a [ListingRecord], query: &str) -> Vec<&'a ListingRecord> {
    let needle = query.to_lowercase();
    listings
        .iter()
        .filter(|listing| listing.title.to_lowercase().contains(&needle))
        .collect()
}
