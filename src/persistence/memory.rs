//! In-process marker store.
//!
//! Mirrors the PostgreSQL store's observable behavior: IDs increase
//! monotonically and are never reused, and listing follows
//! [`newest_first`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::MarkerStore;
use crate::domain::{Marker, NewMarker, newest_first};
use crate::error::GatewayError;

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: Vec<Marker>,
}

/// Marker store held in memory behind a [`tokio::sync::RwLock`].
#[derive(Debug, Default)]
pub struct MemoryMarkerStore {
    table: RwLock<Table>,
}

impl MemoryMarkerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Current time truncated to microseconds, the resolution of `TIMESTAMPTZ`.
fn now_micros() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

#[async_trait]
impl MarkerStore for MemoryMarkerStore {
    async fn insert(&self, marker: &NewMarker) -> Result<i64, GatewayError> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| GatewayError::PersistenceError("marker id overflow".to_string()))?;
        table.last_id = id;
        table.rows.push(Marker {
            id,
            lat: Some(marker.lat),
            lng: Some(marker.lng),
            comment: Some(marker.comment.clone()),
            created_at: Some(marker.created_at.unwrap_or_else(now_micros)),
        });
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Marker>, GatewayError> {
        let mut rows = self.table.read().await.rows.clone();
        rows.sort_by(newest_first);
        Ok(rows)
    }

    async fn clear(&self) -> Result<(), GatewayError> {
        self.table.write().await.rows.clear();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<u64, GatewayError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|m| m.id != id);
        Ok((before - table.rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryMarkerStore::new();
        let Ok(first) = store.insert(&NewMarker::new(1.0, 2.0, "a")).await else {
            panic!("insert failed");
        };
        assert!(matches!(store.delete(first).await, Ok(1)));
        let Ok(second) = store.insert(&NewMarker::new(1.0, 2.0, "b")).await else {
            panic!("insert failed");
        };
        assert!(second > first);
    }

    #[tokio::test]
    async fn ids_are_not_reset_by_clear() {
        let store = MemoryMarkerStore::new();
        let Ok(first) = store.insert(&NewMarker::new(0.0, 0.0, "")).await else {
            panic!("insert failed");
        };
        assert!(store.clear().await.is_ok());
        let Ok(second) = store.insert(&NewMarker::new(0.0, 0.0, "")).await else {
            panic!("insert failed");
        };
        assert!(second > first);
    }

    #[tokio::test]
    async fn delete_of_missing_id_affects_nothing() {
        let store = MemoryMarkerStore::new();
        assert!(matches!(store.delete(99).await, Ok(0)));
    }

    #[tokio::test]
    async fn inserted_rows_get_a_timestamp() {
        let store = MemoryMarkerStore::new();
        assert!(store.insert(&NewMarker::new(3.5, -4.25, "x")).await.is_ok());
        let Ok(rows) = store.list().await else {
            panic!("list failed");
        };
        let Some(row) = rows.first() else {
            panic!("row missing");
        };
        assert!(row.created_at.is_some());
        assert_eq!(row.lat, Some(3.5));
        assert_eq!(row.lng, Some(-4.25));
    }
}
