//! Catalog Service
//!
//! Serves the catalog RPC methods over HTTP/JSON on one port and a health
//! endpoint on another, backed by the SQLite item store.

pub mod config;
pub mod rpc_server;

pub use config::CatalogServiceConfig;
pub use rpc_server::{health_router, rpc_router, DEFAULT_RPC_TIMEOUT};

use anyhow::Result;
use catalog_core::{CatalogRpc, CatalogService};
use catalog_storage::{Database, SqliteItemRepository};
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};
use tracing::info;

/// Open the store named by `database_url` and build the service over it.
pub fn open_catalog(database_url: &str) -> Result<CatalogService> {
    let db = Database::connect(database_url)?;
    info!(
        database = %database_url,
        schema_version = db.schema_version()?,
        "[CatalogService] Database ready"
    );

    let repository = SqliteItemRepository::new(Arc::new(Mutex::new(db)));
    Ok(CatalogService::new(Arc::new(repository)))
}

/// Serve RPC and health listeners until `shutdown` resolves.
pub async fn serve<F>(
    rpc_listener: TcpListener,
    http_listener: TcpListener,
    catalog: Arc<dyn CatalogRpc>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown.await;
        let _ = stop_tx.send(true);
    });

    info!("[CatalogService] RPC listening on {}", rpc_listener.local_addr()?);
    info!("[CatalogService] HTTP listening on {}", http_listener.local_addr()?);

    let rpc = axum::serve(rpc_listener, rpc_router(catalog))
        .with_graceful_shutdown(wait_for_stop(stop_rx.clone()));
    let http = axum::serve(http_listener, health_router())
        .with_graceful_shutdown(wait_for_stop(stop_rx));

    tokio::try_join!(rpc.into_future(), http.into_future())?;

    info!("[CatalogService] Stopped");
    Ok(())
}

async fn wait_for_stop(mut stop: watch::Receiver<bool>) {
    // A dropped sender also means stop
    let _ = stop.wait_for(|stopped| *stopped).await;
}
