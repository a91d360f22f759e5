use thiserror::Error;

/// Coarse classification shared by every integration error.
///
/// Callers that only need to decide between "fix your setup" and "the
/// remote call failed" match on this instead of each crate's own enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required credential or setting is missing or invalid. Raised
    /// before any network call is made.
    Configuration,
    /// The outbound request failed: network, auth, rate limit, provider
    /// error, or an undecodable response body.
    Transport,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Transport => write!(f, "transport"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

impl ConfigError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}
