//! Remote listing source over HTTP

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info, warn};

use super::error::FetchError;
use crate::domain::{normalize, ListingRecord, SourcePost};

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can produce raw posts for the dashboard
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<SourcePost>, FetchError>;

    /// Human readable source description for logs
    fn describe(&self) -> String;
}

/// `GET <endpoint>?_limit=<n>` returning a JSON array of posts
pub struct HttpListingSource {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpListingSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Use a preconfigured client, e.g. one without proxy lookup
    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<SourcePost>, FetchError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("_limit", limit)])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        serde_json::from_slice::<Vec<SourcePost>>(&body)
            .map_err(|err| FetchError::Payload(err.to_string()))
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Fetch and normalize listings. Price and location come from `rng`.
pub async fn fetch_listings<R: Rng + ?Sized>(
    source: &dyn ListingSource,
    limit: usize,
    rng: &mut R,
) -> Result<Vec<ListingRecord>, FetchError> {
    debug!(source = %source.describe(), limit, "fetching listings");
    match source.fetch_posts(limit).await {
        Ok(posts) => {
            let listings = normalize(posts, rng);
            info!(count = listings.len(), "listings loaded");
            Ok(listings)
        }
        Err(err) => {
            warn!(error = %err, "listing fetch failed");
            Err(err)
        }
    }
}
