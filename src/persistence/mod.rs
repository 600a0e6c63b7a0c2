//! Persistence layer: the `markers` table.
//!
//! Provides the [`MarkerStore`] trait for marker storage. The production
//! implementation uses `sqlx::PgPool`; [`MemoryMarkerStore`] keeps rows in
//! process memory for local runs without a database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{Marker, NewMarker};
use crate::error::GatewayError;

pub use memory::MemoryMarkerStore;
pub use postgres::PostgresMarkerStore;

/// Storage operations backing the marker endpoints.
///
/// Each method is a single auto-committed statement.
#[async_trait]
pub trait MarkerStore: Send + Sync + std::fmt::Debug {
    /// Inserts a marker and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    async fn insert(&self, marker: &NewMarker) -> Result<i64, GatewayError>;

    /// Returns all markers, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    async fn list(&self) -> Result<Vec<Marker>, GatewayError>;

    /// Removes every marker.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    async fn clear(&self) -> Result<(), GatewayError>;

    /// Deletes the marker with the given ID and returns the number of
    /// rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    async fn delete(&self, id: i64) -> Result<u64, GatewayError>;

    /// Checks that the store can serve requests.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the store is unreachable.
    async fn ping(&self) -> Result<(), GatewayError>;
}
