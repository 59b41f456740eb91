use thiserror::Error;

/// Shown in place of the content when the listing fetch fails
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch listings";

/// The listing fetch failed. The variant only records the cause for the log;
/// every variant is reported to the user the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("listing fetch failed: transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("listing fetch failed: HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("listing fetch failed: malformed payload: {0}")]
    Payload(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}
