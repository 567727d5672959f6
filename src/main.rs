//! storedata-gateway server entry point.
//!
//! Checks the database, then serves the REST endpoints until Ctrl+C or
//! SIGTERM. An unreachable database degrades the service; only failing to
//! bind the listen address stops it.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use storedata_gateway::api;
use storedata_gateway::api::cors::{OriginAllowList, SharedOriginPolicy};
use storedata_gateway::app_state::AppState;
use storedata_gateway::config::{GatewayConfig, LogFormat, StoreBackend};
use storedata_gateway::persistence::{InMemoryRecordStore, MySqlRecordStore, RecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config =
        GatewayConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    init_tracing(config.log_format);
    tracing::info!(
        addr = %config.listen_addr,
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.database,
        "starting storedata-gateway"
    );

    // Build persistence layer
    let store: Arc<dyn RecordStore> = match config.store_backend {
        StoreBackend::MySql => Arc::new(MySqlRecordStore::connect_lazy(&config.database)),
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; records will not survive a restart");
            Arc::new(InMemoryRecordStore::new())
        }
    };

    // Build application state and check the database once
    let app_state = AppState::new(store);
    app_state.health_monitor.startup_check().await;
    if let Some(interval) = config.health_check_interval {
        tracing::info!(interval_secs = interval.as_secs(), "periodic database check enabled");
        let _check_task = Arc::clone(&app_state.health_monitor).spawn_periodic(interval);
    }

    // Build router
    if config.allowed_origins.is_empty() {
        tracing::warn!("CORS allow-list is empty; every cross-origin request will be rejected");
    }
    let origins: SharedOriginPolicy = Arc::new(OriginAllowList::new(config.allowed_origins));
    let app = api::build_app(app_state, origins);

    // Start server
    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "backend server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::warn!("received Ctrl+C, shutting down"),
        () = terminate => tracing::warn!("received SIGTERM, shutting down"),
    }
}
