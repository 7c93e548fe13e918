//! Error types for emotion AI provider operations.

use std::fmt;

/// Universal error type that abstracts provider-specific errors into common variants.
///
/// All provider implementations should map their native errors to these variants,
/// preserving context while maintaining a provider-agnostic interface. Callers of the
/// emotion engine never surface these to end users; they select a fallback instead.
#[derive(Debug)]
pub enum Error {
    /// API key authentication failures. Credentials are invalid, expired, or lack
    /// the necessary permissions.
    Authentication(String),

    /// Network connectivity issues, DNS failures, or connection resets.
    /// These errors are typically transient and may benefit from retry logic.
    Network(String),

    /// Missing or malformed configuration, including a provider that was never configured.
    Configuration(String),

    /// Provider-side business logic errors or non-success responses.
    Provider(String),

    /// Operation exceeded the configured timeout period.
    Timeout(String),

    /// Provider rate limit exceeded. Clients must wait before retrying.
    RateLimited { retry_after_seconds: u64 },

    /// The provider answered, but the payload could not be decoded or was unusable
    /// (e.g. an empty completion).
    Deserialization(String),

    /// Catch-all for errors that don't fit other categories.
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// True for failures that a later attempt could plausibly avoid.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Timeout(_) | Error::RateLimited { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Provider(msg) => write!(f, "Provider error: {}", msg),
            Error::Timeout(msg) => write!(f, "Timeout: {}", msg),
            Error::RateLimited {
                retry_after_seconds,
            } => {
                write!(f, "Rate limited: retry after {}s", retry_after_seconds)
            }
            Error::Deserialization(msg) => write!(f, "Deserialization error: {}", msg),
            Error::Other(err) => write!(f, "Other error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialization(err.to_string())
    }
}
