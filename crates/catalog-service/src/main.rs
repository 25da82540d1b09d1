//! `catalog-service` binary: RPC server over the persisted item store.

use anyhow::{anyhow, Result};
use catalog_service::{open_catalog, serve, CatalogServiceConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Console logging; `RUST_LOG` takes precedence over the defaults.
fn init_tracing() -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(
            "info,catalog_core=debug,catalog_storage=debug,catalog_service=debug",
        )?,
    };

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for development)
    dotenvy::dotenv().ok();
    init_tracing()?;

    let config = CatalogServiceConfig::from_env()?;
    let catalog = open_catalog(&config.database_url)?;

    let rpc_listener = TcpListener::bind(config.rpc_addr()?).await?;
    let http_listener = TcpListener::bind(config.http_addr()?).await?;

    serve(rpc_listener, http_listener, Arc::new(catalog), shutdown_signal()).await
}
