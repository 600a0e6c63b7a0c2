//! Configuration-backed endpoints: maps key and password check.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{MapsKeyResponse, PasswordCheckRequest, PasswordCheckResponse};
use crate::api::extract::ValidJson;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /maps-key` — Hand out the configured maps API key.
///
/// An unconfigured key is reported in the body with status 200.
#[utoipa::path(
    get,
    path = "/maps-key",
    tag = "Access",
    summary = "Get the maps API key",
    description = "Returns `{apiKey}` when configured, otherwise `{error}`. Both use status 200.",
    responses(
        (status = 200, description = "Key or configuration notice", body = MapsKeyResponse),
    )
)]
pub async fn maps_key(State(state): State<AppState>) -> impl IntoResponse {
    let body = match state.access_service.maps_key() {
        Some(key) => MapsKeyResponse::Configured {
            api_key: key.to_string(),
        },
        None => MapsKeyResponse::Missing {
            error: "GOOGLE_MAPS_API_KEY not configured".to_string(),
        },
    };
    Json(body)
}

/// `POST /auth/check` — Compare a password with the shared secret.
///
/// # Errors
///
/// Returns [`GatewayError::Unauthorized`] on mismatch and
/// [`GatewayError::NotConfigured`] when no password is set.
#[utoipa::path(
    post,
    path = "/auth/check",
    tag = "Access",
    summary = "Check the shared password",
    request_body = PasswordCheckRequest,
    responses(
        (status = 200, description = "Password matches", body = PasswordCheckResponse),
        (status = 401, description = "Password does not match", body = ErrorResponse),
        (status = 500, description = "No password configured", body = ErrorResponse),
    )
)]
pub async fn auth_check(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<PasswordCheckRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let password = req.password.unwrap_or_default();
    state.access_service.check_password(&password)?;
    Ok(Json(PasswordCheckResponse { ok: true }))
}

/// Access routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/maps-key", get(maps_key))
        .route("/auth/check", post(auth_check))
}
