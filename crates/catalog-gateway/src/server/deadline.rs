//! Per-call deadline for backend calls.

use catalog_core::{CatalogError, CatalogResult};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default budget for a single backend call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a backend call, failing with an internal error once `timeout` elapses.
///
/// The in-flight future is dropped on expiry, which aborts it.
pub async fn with_deadline<T, F>(timeout: Duration, call: F) -> CatalogResult<T>
where
    F: Future<Output = CatalogResult<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "Backend call deadline exceeded");
            Err(CatalogError::deadline_exceeded())
        }
    }
}
