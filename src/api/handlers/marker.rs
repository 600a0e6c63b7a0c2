//! Marker handlers: create, list, clear, delete, export.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::api::dto::{CreateMarkerRequest, MarkerDto, StatusResponse};
use crate::api::extract::{MarkerId, ValidJson};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /markers` — Store a new marker.
///
/// The new marker's ID is not echoed back.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] on a malformed body.
#[utoipa::path(
    post,
    path = "/markers",
    tag = "Markers",
    summary = "Create a marker",
    description = "Stores a marker with the given coordinates and comment. The creation time is set by the server.",
    request_body = CreateMarkerRequest,
    responses(
        (status = 200, description = "Marker saved", body = StatusResponse),
        (status = 422, description = "Malformed or incomplete body", body = ErrorResponse),
    )
)]
pub async fn create_marker(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateMarkerRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    state.marker_service.create_marker(req.into()).await?;
    Ok(Json(StatusResponse::new("saved")))
}

/// `GET /markers` — List all markers, newest first.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/markers",
    tag = "Markers",
    summary = "List markers",
    description = "Returns every marker ordered by creation time descending, then ID descending.",
    responses(
        (status = 200, description = "All markers", body = Vec<MarkerDto>),
    )
)]
pub async fn list_markers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let markers = state.marker_service.list_markers().await?;
    let data: Vec<MarkerDto> = markers.into_iter().map(MarkerDto::from).collect();
    Ok(Json(data))
}

/// `DELETE /markers` — Remove every marker.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceError`] on storage failure.
#[utoipa::path(
    delete,
    path = "/markers",
    tag = "Markers",
    summary = "Delete all markers",
    responses(
        (status = 200, description = "All markers removed", body = StatusResponse),
    )
)]
pub async fn clear_markers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    state.marker_service.clear_markers().await?;
    Ok(Json(StatusResponse::new("cleared")))
}

/// `GET /markers/export` — Download all markers as CSV.
///
/// # Errors
///
/// Returns [`GatewayError`] on storage or rendering failure.
#[utoipa::path(
    get,
    path = "/markers/export",
    tag = "Markers",
    summary = "Export markers as CSV",
    description = "Same rows and order as the listing, as a `markers.csv` attachment.",
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
    )
)]
pub async fn export_markers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let csv = state.marker_service.export_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=markers.csv"),
        ],
        csv,
    ))
}

/// `DELETE /markers/{id}` — Remove one marker.
///
/// # Errors
///
/// Returns [`GatewayError::MarkerNotFound`] if no marker has this ID.
#[utoipa::path(
    delete,
    path = "/markers/{id}",
    tag = "Markers",
    summary = "Delete a marker",
    params(
        ("id" = i64, Path, description = "Marker ID"),
    ),
    responses(
        (status = 200, description = "Marker deleted", body = StatusResponse),
        (status = 404, description = "Marker not found", body = ErrorResponse),
        (status = 422, description = "ID is not an integer", body = ErrorResponse),
    )
)]
pub async fn delete_marker(
    State(state): State<AppState>,
    MarkerId(id): MarkerId,
) -> Result<impl IntoResponse, GatewayError> {
    state.marker_service.delete_marker(id).await?;
    Ok(Json(StatusResponse::with_id("deleted", id)))
}

/// Marker routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/markers",
            get(list_markers).post(create_marker).delete(clear_markers),
        )
        .route("/markers/export", get(export_markers))
        .route("/markers/{id}", delete(delete_marker))
}
