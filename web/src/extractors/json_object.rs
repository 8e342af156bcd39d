use crate::Error;
use axum::extract::{FromRequest, Request};
use axum::Json;
use domain::error::{Error as DomainError, ValidationErrorKind};
use log::*;
use serde::de::DeserializeOwned;

/// Extracts a JSON object body into `T`.
///
/// Unlike `axum::Json`, every way the body can be unusable (missing or wrong
/// content type, invalid JSON, a JSON value that is not an object) is reported
/// as the same validation error, rendered as a 400 with an `error` field.
pub(crate) struct JsonObject<T>(pub T);

impl<S, T> FromRequest<S> for JsonObject<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!("Unreadable JSON body: {rejection}");
                malformed_body()
            })?;

        if !value.is_object() {
            return Err(malformed_body());
        }

        serde_json::from_value(value).map(JsonObject).map_err(|err| {
            debug!("JSON body does not match the expected shape: {err}");
            malformed_body()
        })
    }
}

fn malformed_body() -> Error {
    DomainError::validation(ValidationErrorKind::MalformedBody).into()
}
