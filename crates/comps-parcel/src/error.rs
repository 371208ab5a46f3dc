use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParcelError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Upstream { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid BBL '{input}': {reason}")]
    InvalidBbl { input: String, reason: String },

    #[error("no tax lot found for {house} {street}, {borough}")]
    AddressNotFound {
        house: String,
        street: String,
        borough: String,
    },
}
