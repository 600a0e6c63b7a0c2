//! REST endpoint handlers organized by resource.

pub mod access;
pub mod marker;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the marker and access routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(marker::routes())
        .merge(access::routes())
}
