use docqa_core::ErrorKind;
use thiserror::Error;

/// Errors returned by [`crate::ComprehendClient`].
#[derive(Debug, Error)]
pub enum SentimentError {
    /// A required AWS credential is empty. Raised before any request.
    #[error("missing AWS credential: {0}")]
    MissingCredential(&'static str),

    /// The endpoint URL could not be parsed or has no host.
    #[error("invalid Comprehend endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error calling {operation}: {source}")]
    Http {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Comprehend answered with a non-2xx status.
    #[error("Comprehend returned HTTP {status} ({error_type}): {message}")]
    Api {
        status: u16,
        error_type: String,
        message: String,
    },

    /// A request or response body could not be (de)serialized.
    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SentimentError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SentimentError::MissingCredential(_)
            | SentimentError::InvalidEndpoint { .. }
            | SentimentError::ClientBuild(_) => ErrorKind::Configuration,
            SentimentError::Http { .. } | SentimentError::Api { .. } | SentimentError::Json { .. } => {
                ErrorKind::Transport
            }
        }
    }
}
