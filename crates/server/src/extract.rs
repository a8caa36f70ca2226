use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;
use crate::validation::{FieldErrors, Validate};

/// JSON body that has passed validation; handlers only ever see the
/// service payload.
///
/// Malformed bodies (bad JSON, wrong types, unknown fields, missing
/// content type) are reported under the `_body` key.
pub struct ValidJson<T: Validate>(pub T::Output);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(FieldErrors::single("_body", e.body_text())))?;
        raw.validate().map(ValidJson).map_err(ApiError::Validation)
    }
}

/// Numeric `{id}` path segment. Anything that is not an integer names no
/// resource and is answered with the JSON 404 body.
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(EntityId(id)),
            Err(rejection) => {
                debug!(path = %parts.uri.path(), error = %rejection.body_text(), "unroutable id");
                Err(ApiError::NotFound(format!("Resource not found: {}", parts.uri.path())))
            }
        }
    }
}
