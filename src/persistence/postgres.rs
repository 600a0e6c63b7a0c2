//! PostgreSQL implementation of the marker store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::MarkerStore;
use crate::config::DatabaseConfig;
use crate::domain::{Marker, NewMarker};
use crate::error::GatewayError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS markers (\
     id SERIAL PRIMARY KEY, \
     lat DOUBLE PRECISION, \
     lng DOUBLE PRECISION, \
     comment TEXT, \
     created_at TIMESTAMPTZ DEFAULT now())";

const ADD_CREATED_AT: &str =
    "ALTER TABLE markers ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ DEFAULT now()";

const BACKFILL_CREATED_AT: &str = "UPDATE markers SET created_at = now() WHERE created_at IS NULL";

type MarkerRow = (
    i64,
    Option<f64>,
    Option<f64>,
    Option<String>,
    Option<DateTime<Utc>>,
);

/// PostgreSQL-backed marker store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresMarkerStore {
    pool: PgPool,
}

impl PostgresMarkerStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from the database settings.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the database is
    /// unreachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout())
            .connect_with(config.connect_options())
            .await?;
        Ok(Self::new(pool))
    }

    /// Ensures the `markers` table and its `created_at` column exist and
    /// backfills `created_at` on rows that lack it.
    ///
    /// Safe to run against a fresh database or a table from an older
    /// release. Runs in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), GatewayError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;
        sqlx::query(ADD_CREATED_AT).execute(&mut *tx).await?;
        let backfilled = sqlx::query(BACKFILL_CREATED_AT)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        tracing::info!(backfilled, "markers schema ready");
        Ok(())
    }
}

#[async_trait]
impl MarkerStore for PostgresMarkerStore {
    async fn insert(&self, marker: &NewMarker) -> Result<i64, GatewayError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO markers (lat, lng, comment, created_at) \
             VALUES ($1, $2, $3, COALESCE($4, now())) RETURNING id::BIGINT",
        )
        .bind(marker.lat)
        .bind(marker.lng)
        .bind(&marker.comment)
        .bind(marker.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Marker>, GatewayError> {
        let rows = sqlx::query_as::<_, MarkerRow>(
            "SELECT id::BIGINT, lat, lng, comment, created_at FROM markers \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, lat, lng, comment, created_at)| Marker {
                id,
                lat,
                lng,
                comment,
                created_at,
            })
            .collect())
    }

    async fn clear(&self) -> Result<(), GatewayError> {
        sqlx::query("TRUNCATE TABLE markers")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<u64, GatewayError> {
        let result = sqlx::query("DELETE FROM markers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    // Run against a scratch database:
    // DATABASE_URL=postgres://... cargo test -- --ignored

    use std::sync::atomic::{AtomicU32, Ordering};

    use chrono::TimeZone;
    use sqlx::postgres::PgConnectOptions;

    use super::*;
    use crate::service::MarkerService;

    static NEXT_SCHEMA: AtomicU32 = AtomicU32::new(0);

    /// A store confined to a fresh schema, so tests never see each
    /// other's `markers` table.
    struct Scratch {
        store: PostgresMarkerStore,
        admin: PgPool,
        schema: String,
    }

    impl Scratch {
        async fn new() -> Self {
            let Ok(url) = std::env::var("DATABASE_URL") else {
                panic!("DATABASE_URL must point at a scratch database");
            };
            let Ok(base) = url.parse::<PgConnectOptions>() else {
                panic!("DATABASE_URL is not a valid postgres url");
            };
            let schema = format!(
                "markers_test_{}_{}_{}",
                std::process::id(),
                NEXT_SCHEMA.fetch_add(1, Ordering::Relaxed),
                Utc::now().timestamp_micros()
            );

            let Ok(admin) = PgPoolOptions::new()
                .max_connections(1)
                .connect_with(base.clone())
                .await
            else {
                panic!("cannot connect to DATABASE_URL");
            };
            let created = sqlx::query(&format!("CREATE SCHEMA {schema}"))
                .execute(&admin)
                .await;
            assert!(created.is_ok(), "create schema: {created:?}");

            let Ok(pool) = PgPoolOptions::new()
                .max_connections(2)
                .connect_with(base.options([("search_path", schema.as_str())]))
                .await
            else {
                panic!("cannot connect to scratch schema");
            };

            Self {
                store: PostgresMarkerStore::new(pool),
                admin,
                schema,
            }
        }

        async fn ready() -> Self {
            let scratch = Self::new().await;
            let bootstrapped = scratch.store.ensure_schema().await;
            assert!(bootstrapped.is_ok(), "bootstrap: {bootstrapped:?}");
            scratch
        }

        async fn exec(&self, sql: &str) {
            let result = sqlx::query(sql).execute(&self.store.pool).await;
            assert!(result.is_ok(), "{sql}: {result:?}");
        }

        async fn insert(&self, marker: NewMarker) -> i64 {
            let Ok(id) = self.store.insert(&marker).await else {
                panic!("insert failed");
            };
            id
        }

        async fn list(&self) -> Vec<Marker> {
            let Ok(rows) = self.store.list().await else {
                panic!("list failed");
            };
            rows
        }

        async fn drop_schema(self) {
            self.store.pool.close().await;
            let _ = sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
                .execute(&self.admin)
                .await;
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        let Some(ts) = Utc.timestamp_opt(secs, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bootstrap_upgrades_legacy_table_and_backfills() {
        let scratch = Scratch::new().await;
        scratch
            .exec(
                "CREATE TABLE markers (id SERIAL PRIMARY KEY, lat DOUBLE PRECISION, \
                 lng DOUBLE PRECISION, comment TEXT)",
            )
            .await;
        scratch
            .exec(
                "INSERT INTO markers (lat, lng, comment) \
                 VALUES (1.0, 2.0, 'old'), (3.0, 4.0, NULL)",
            )
            .await;

        assert!(scratch.store.ensure_schema().await.is_ok());
        // Second run against the upgraded table is a no-op.
        assert!(scratch.store.ensure_schema().await.is_ok());

        let nulls = sqlx::query_scalar::<_, i64>(
            "SELECT count(*) FROM markers WHERE created_at IS NULL",
        )
        .fetch_one(&scratch.store.pool)
        .await;
        assert!(matches!(nulls, Ok(0)), "{nulls:?}");

        let rows = scratch.list().await;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|m| m.created_at.is_some()));
        assert!(rows.iter().any(|m| m.comment.is_none()));

        // The column default applies to new rows as well.
        scratch.insert(NewMarker::new(5.0, 6.0, "new")).await;
        assert!(scratch.list().await.iter().all(|m| m.created_at.is_some()));

        scratch.drop_schema().await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_orders_by_time_then_id_descending() {
        let scratch = Scratch::ready().await;
        let early = scratch.insert(NewMarker::new(0.0, 0.0, "early").at(at(1_000))).await;
        let late_a = scratch.insert(NewMarker::new(0.0, 0.0, "late-a").at(at(2_000))).await;
        let late_b = scratch.insert(NewMarker::new(0.0, 0.0, "late-b").at(at(2_000))).await;

        let ids: Vec<i64> = scratch.list().await.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![late_b, late_a, early]);

        scratch.drop_schema().await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_round_trips_values_and_defaults_created_at() {
        let scratch = Scratch::ready().await;
        let id = scratch.insert(NewMarker::new(1.0, -2.5, "test")).await;

        let rows = scratch.list().await;
        let Some(row) = rows.first() else {
            panic!("row missing");
        };
        assert_eq!(row.id, id);
        assert_eq!(row.lat, Some(1.0));
        assert_eq!(row.lng, Some(-2.5));
        assert_eq!(row.comment.as_deref(), Some("test"));
        assert!(row.created_at.is_some());

        scratch.drop_schema().await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_reports_rows_affected_and_service_maps_zero_to_not_found() {
        let scratch = Scratch::ready().await;
        let id = scratch.insert(NewMarker::new(1.0, 2.0, "x")).await;

        assert!(matches!(scratch.store.delete(id).await, Ok(1)));
        assert!(matches!(scratch.store.delete(id).await, Ok(0)));

        let service = MarkerService::new(std::sync::Arc::new(scratch.store.clone()));
        assert!(matches!(
            service.delete_marker(id).await,
            Err(GatewayError::MarkerNotFound(missing)) if missing == id
        ));

        scratch.drop_schema().await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn truncate_keeps_the_id_sequence() {
        let scratch = Scratch::ready().await;
        let first = scratch.insert(NewMarker::new(0.0, 0.0, "a")).await;

        assert!(scratch.store.clear().await.is_ok());
        assert!(scratch.list().await.is_empty());
        // Clearing an empty table succeeds too.
        assert!(scratch.store.clear().await.is_ok());

        let second = scratch.insert(NewMarker::new(0.0, 0.0, "b")).await;
        assert!(second > first);

        scratch.drop_schema().await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_succeeds_on_live_pool() {
        let scratch = Scratch::ready().await;
        assert!(scratch.store.ping().await.is_ok());
        scratch.drop_schema().await;
    }
}
