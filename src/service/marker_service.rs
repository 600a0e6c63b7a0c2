//! Marker service: create, list, clear, delete and export markers.

use std::sync::Arc;

use crate::domain::{Marker, NewMarker};
use crate::error::GatewayError;
use crate::persistence::MarkerStore;

use super::csv_export;

/// Orchestration layer for marker operations.
///
/// Stateless coordinator over a shared [`MarkerStore`]; every method
/// issues exactly one storage call.
#[derive(Debug, Clone)]
pub struct MarkerService {
    store: Arc<dyn MarkerStore>,
}

impl MarkerService {
    /// Creates a new `MarkerService`.
    #[must_use]
    pub fn new(store: Arc<dyn MarkerStore>) -> Self {
        Self { store }
    }

    /// Stores a new marker and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the store fails.
    pub async fn create_marker(&self, marker: NewMarker) -> Result<i64, GatewayError> {
        let id = self.store.insert(&marker).await?;
        tracing::info!(id, lat = marker.lat, lng = marker.lng, "marker saved");
        Ok(id)
    }

    /// Returns all markers, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the store fails.
    pub async fn list_markers(&self) -> Result<Vec<Marker>, GatewayError> {
        self.store.list().await
    }

    /// Removes every marker.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the store fails.
    pub async fn clear_markers(&self) -> Result<(), GatewayError> {
        self.store.clear().await?;
        tracing::info!("markers cleared");
        Ok(())
    }

    /// Deletes a single marker.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MarkerNotFound`] if no row had the given ID.
    pub async fn delete_marker(&self, id: i64) -> Result<(), GatewayError> {
        if self.store.delete(id).await? == 0 {
            return Err(GatewayError::MarkerNotFound(id));
        }
        tracing::info!(id, "marker deleted");
        Ok(())
    }

    /// Reports whether the marker store is reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the store cannot be reached.
    pub async fn check_storage(&self) -> Result<(), GatewayError> {
        self.store.ping().await
    }

    /// Renders all markers as a CSV document, in listing order.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the store fails or the document
    /// cannot be written.
    pub async fn export_csv(&self) -> Result<String, GatewayError> {
        let markers = self.store.list().await?;
        csv_export::render(&markers)
    }
}
