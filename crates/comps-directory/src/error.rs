use thiserror::Error;

/// Errors returned by the directory client.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport failure (connect, TLS, timeout) from the underlying HTTP client.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The directory answered with a non-2xx status.
    #[error("directory returned HTTP {status} for {url}")]
    Upstream { status: u16, url: String },

    /// The response body did not match the expected schema.
    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
