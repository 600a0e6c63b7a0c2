//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{AccessService, MarkerService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Marker service for all marker endpoints.
    pub marker_service: Arc<MarkerService>,
    /// Maps key and password check.
    pub access_service: Arc<AccessService>,
}
