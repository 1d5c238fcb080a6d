use thiserror::Error;

/// Failures inside a single extraction step.
///
/// None of these escape [`crate::MetadataFetcher::fetch_url_metadata`]; they
/// exist so the individual steps can use `?` and the caller of each step can
/// log what went wrong before degrading to `None`.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
