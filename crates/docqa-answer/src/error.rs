use docqa_core::ErrorKind;
use thiserror::Error;

/// What was being asked when a chat completion failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub model: String,
    pub question_length: usize,
    pub document_length: usize,
}

impl std::fmt::Display for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "model={}, question_length={}, document_length={}",
            self.model, self.question_length, self.document_length
        )
    }
}

/// Errors returned by [`crate::ChatAnswerer`].
#[derive(Debug, Error)]
pub enum ChatError {
    /// No API key configured. Raised before any request.
    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    #[error("invalid chat completion base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("chat completion request failed ({context}): {source}")]
    Http {
        context: RequestContext,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status.
    #[error("chat completion API returned HTTP {status} ({context}): {message}")]
    Api {
        context: RequestContext,
        status: u16,
        message: String,
    },

    /// The response body did not match the completion schema.
    #[error("chat completion response could not be decoded ({context}): {source}")]
    Json {
        context: RequestContext,
        #[source]
        source: serde_json::Error,
    },

    /// The response had no choices, or the first choice had no content.
    #[error("chat completion response had no message content ({context})")]
    EmptyCompletion { context: RequestContext },
}

impl ChatError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::MissingApiKey
            | ChatError::InvalidBaseUrl { .. }
            | ChatError::ClientBuild(_) => ErrorKind::Configuration,
            ChatError::Http { .. }
            | ChatError::Api { .. }
            | ChatError::Json { .. }
            | ChatError::EmptyCompletion { .. } => ErrorKind::Transport,
        }
    }

    /// The request context, for errors raised after a request was built.
    #[must_use]
    pub fn context(&self) -> Option<&RequestContext> {
        match self {
            ChatError::Http { context, .. }
            | ChatError::Api { context, .. }
            | ChatError::Json { context, .. }
            | ChatError::EmptyCompletion { context } => Some(context),
            ChatError::MissingApiKey
            | ChatError::InvalidBaseUrl { .. }
            | ChatError::ClientBuild(_) => None,
        }
    }
}
