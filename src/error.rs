use thiserror::Error;

pub type LoadResult<T> = Result<T, LoadError>;

/// Why a content tier failed. The loader logs these and moves on to the next tier.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP error {status} for {url}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tier not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Max retries exceeded for {0}")]
    RetriesExhausted(String),
}
