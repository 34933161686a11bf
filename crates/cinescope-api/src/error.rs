use thiserror::Error;

/// Failure of a single catalog request. Nothing here is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("no catalog API key configured (run `cinescope config set-key`)")]
    MissingApiKey,
}
