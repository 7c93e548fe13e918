//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field holds the original error that caused
/// the domain error. Errors are translated between layers while maintaining
/// layer boundaries: `web` depends on `domain`, never directly on `entity_api`
/// or `emotion_ai`.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// The caller's input was rejected before any collaborator was contacted.
    Input(InputErrorKind),
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

#[derive(Debug, PartialEq)]
pub enum InputErrorKind {
    /// Empty, whitespace-only, or nothing left after cleaning.
    EmptyText,
    TextTooLong { max_chars: usize },
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    Config,
    Other(String),
}

/// Entity errors bubbled up from `entity_api`, reduced to the kinds the
/// `domain` layer cares about.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound,
    Invalid,
    DbTransaction,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    Timeout,
    Authentication,
    RateLimited,
    Other(String),
}

impl Error {
    pub fn input(kind: InputErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Input(kind),
        }
    }
}

impl fmt::Display for InputErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputErrorKind::EmptyText => write!(f, "Empty or invalid input text"),
            InputErrorKind::TextTooLong { max_chars } => {
                write!(f, "Input text exceeds the maximum of {max_chars} characters")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => EntityErrorKind::NotFound,
            EntityApiErrorKind::InvalidData => EntityErrorKind::Invalid,
            EntityApiErrorKind::SystemError => EntityErrorKind::DbTransaction,
            _ => EntityErrorKind::Other("EntityErrorKind".to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

impl From<emotion_ai::Error> for Error {
    fn from(err: emotion_ai::Error) -> Self {
        let error_kind = match &err {
            emotion_ai::Error::Network(_) => DomainErrorKind::External(ExternalErrorKind::Network),
            emotion_ai::Error::Timeout(_) => DomainErrorKind::External(ExternalErrorKind::Timeout),
            emotion_ai::Error::Authentication(_) => {
                DomainErrorKind::External(ExternalErrorKind::Authentication)
            }
            emotion_ai::Error::RateLimited { .. } => {
                DomainErrorKind::External(ExternalErrorKind::RateLimited)
            }
            emotion_ai::Error::Configuration(_) => DomainErrorKind::Internal(InternalErrorKind::Config),
            emotion_ai::Error::Provider(msg) | emotion_ai::Error::Deserialization(msg) => {
                DomainErrorKind::External(ExternalErrorKind::Other(msg.clone()))
            }
            emotion_ai::Error::Other(other) => {
                DomainErrorKind::External(ExternalErrorKind::Other(other.to_string()))
            }
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}
