use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{DomainErrorKind, Error as DomainError};

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{}", self.0)
    }
}

/// Render an error body in the shape every endpoint uses: `{"error": "<message>"}`.
pub(crate) fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

// Validation failures are the caller's to fix and carry the rule that was broken.
// Everything else is a 500 carrying the top-level message only; the source chain
// stays in the server log.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self.0.error_kind {
            DomainErrorKind::Validation(kind) => {
                debug!("Rejected request: {kind}");
                error_body(StatusCode::BAD_REQUEST, kind.to_string())
            }
            DomainErrorKind::Internal(_) => {
                error!("Request failed: {:?}", self.0);
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server error: {}", self.0),
                )
            }
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
