//! Request extractors that report malformed input as
//! [`GatewayError::InvalidRequest`] (422) before any handler runs.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// JSON body extractor whose every rejection is a validation error.
///
/// Covers syntax errors, missing or mistyped fields and a missing
/// `Content-Type: application/json` header alike.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Integer marker ID taken from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerId(pub i64);

impl<S> FromRequestParts<S> for MarkerId
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<i64> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(id))
    }
}
