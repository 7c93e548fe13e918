use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "status_code": status.as_u16(),
            "error": code,
            "message": message,
        })),
    )
        .into_response()
}

fn internal_fault() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_FAULT",
        "INTERNAL SERVER ERROR",
    )
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::Input(input_error_kind) => error_response(
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                &input_error_kind.to_string(),
            ),
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Entity(entity_error_kind) => match entity_error_kind {
                    EntityErrorKind::NotFound => {
                        error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "NOT FOUND")
                    }
                    EntityErrorKind::Invalid => error_response(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "UNPROCESSABLE_ENTITY",
                        "UNPROCESSABLE ENTITY",
                    ),
                    EntityErrorKind::DbTransaction | EntityErrorKind::Other(_) => {
                        warn!("Entity error: {:?}", self.0.source);
                        internal_fault()
                    }
                },
                InternalErrorKind::Config | InternalErrorKind::Other(_) => {
                    warn!("Internal error: {:?}", self.0.source);
                    internal_fault()
                }
            },
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::Network | ExternalErrorKind::Timeout => {
                    error_response(StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE", "BAD GATEWAY")
                }
                ExternalErrorKind::Authentication
                | ExternalErrorKind::RateLimited
                | ExternalErrorKind::Other(_) => {
                    warn!("External error: {:?}", self.0.source);
                    internal_fault()
                }
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
