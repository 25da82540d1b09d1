//! `api-gateway` binary: REST facade in front of the catalog service.

use anyhow::{anyhow, Result};
use catalog_gateway::{GatewayConfig, GatewayServer, RemoteCatalogClient};
use std::sync::Arc;
use tracing::info;

/// Console logging; `RUST_LOG` takes precedence over the defaults.
fn init_tracing() -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new("info,catalog_core=debug,catalog_gateway=debug")?,
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

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for development)
    dotenvy::dotenv().ok();
    init_tracing()?;

    let config = GatewayConfig::from_env()?;
    info!(
        backend = %config.catalog_service_addr,
        timeout_ms = config.call_timeout.as_millis() as u64,
        "[Gateway] Using catalog service"
    );

    let client = RemoteCatalogClient::new(config.catalog_service_addr.clone(), config.call_timeout)?;
    GatewayServer::new(config, Arc::new(client)).run().await
}
