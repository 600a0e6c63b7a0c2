//! marker-gateway server entry point.
//!
//! Loads configuration, prepares the marker store and serves the REST API.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use marker_gateway::api;
use marker_gateway::app_state::AppState;
use marker_gateway::config::GatewayConfig;
use marker_gateway::persistence::{MarkerStore, MemoryMarkerStore, PostgresMarkerStore};
use marker_gateway::service::{AccessService, MarkerService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env().context("invalid LISTEN_ADDR")?;
    tracing::info!(addr = %config.listen_addr, "starting marker-gateway");

    // Storage must be ready before any request is served
    let store: Arc<dyn MarkerStore> = if config.persistence_enabled {
        let store = PostgresMarkerStore::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        store
            .ensure_schema()
            .await
            .context("failed to prepare markers table")?;
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled; markers are kept in memory");
        Arc::new(MemoryMarkerStore::new())
    };

    let app_state = AppState {
        marker_service: Arc::new(MarkerService::new(store)),
        access_service: Arc::new(AccessService::from_config(&config)),
    };

    let app = api::build_app(app_state, config.request_timeout());

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl+c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::warn!("received ctrl+c, shutting down"),
        () = terminate => tracing::warn!("received SIGTERM, shutting down"),
    }
}
