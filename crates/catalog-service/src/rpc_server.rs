//! HTTP/JSON transport for the catalog RPC boundary.
//!
//! Every method is `POST /rpc/catalog.CatalogService/{Method}` with a JSON
//! request body. Failures are answered with an [`RpcStatus`] envelope so the
//! client can restore the error category.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use catalog_core::{
    method_path, CatalogError, CatalogResult, CatalogRpc, CreateItemRequest, DeleteItemRequest,
    DeleteItemResponse, ErrorCategory, GetItemRequest, Item, ItemPage, ListItemsRequest,
    RpcStatus, UpdateItemRequest, CREATE_ITEM, DELETE_ITEM, GET_ITEM, LIST_ITEMS, TIMEOUT_HEADER,
    UPDATE_ITEM,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Budget used when the caller sends no timeout header
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
struct RpcState {
    catalog: Arc<dyn CatalogRpc>,
}

/// RPC failure rendered as status code plus envelope
#[derive(Debug)]
pub struct RpcError(CatalogError);

impl From<CatalogError> for RpcError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

/// Status code carried alongside the envelope
pub fn http_status(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorCategory::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = http_status(self.0.category());
        (status, Json(RpcStatus::from(&self.0))).into_response()
    }
}

type RpcResult<T> = Result<Json<T>, RpcError>;

/// Caller budget from the timeout header, if present and well-formed
fn requested_timeout(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(TIMEOUT_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_millis)
}

/// Run one service call under the caller's budget.
///
/// Once the budget is spent the caller has stopped waiting, so the call is
/// dropped rather than run to completion.
async fn dispatch<T, F>(method: &str, headers: &HeaderMap, call: F) -> RpcResult<T>
where
    T: Serialize,
    F: Future<Output = CatalogResult<T>>,
{
    let budget = requested_timeout(headers).unwrap_or(DEFAULT_RPC_TIMEOUT);
    debug!(method, budget_ms = budget.as_millis() as u64, "[RPC] Call");

    let result = match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(method, "[RPC] Call exceeded caller deadline");
            Err(CatalogError::deadline_exceeded())
        }
    };

    result.map(Json).map_err(|err| {
        if err.category() == ErrorCategory::Internal {
            warn!(method, error = %err, "[RPC] Call failed");
        } else {
            debug!(method, error = %err, "[RPC] Call rejected");
        }
        RpcError(err)
    })
}

fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RpcError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| RpcError(CatalogError::invalid_argument(rejection.body_text())))
}

async fn list_items(
    State(state): State<RpcState>,
    headers: HeaderMap,
    payload: Result<Json<ListItemsRequest>, JsonRejection>,
) -> RpcResult<ItemPage> {
    let request = decode(payload)?;
    dispatch(LIST_ITEMS, &headers, state.catalog.list_items(request)).await
}

async fn get_item(
    State(state): State<RpcState>,
    headers: HeaderMap,
    payload: Result<Json<GetItemRequest>, JsonRejection>,
) -> RpcResult<Item> {
    let request = decode(payload)?;
    dispatch(GET_ITEM, &headers, state.catalog.get_item(request)).await
}

async fn create_item(
    State(state): State<RpcState>,
    headers: HeaderMap,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> RpcResult<Item> {
    let request = decode(payload)?;
    dispatch(CREATE_ITEM, &headers, state.catalog.create_item(request)).await
}

async fn update_item(
    State(state): State<RpcState>,
    headers: HeaderMap,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> RpcResult<Item> {
    let request = decode(payload)?;
    dispatch(UPDATE_ITEM, &headers, state.catalog.update_item(request)).await
}

async fn delete_item(
    State(state): State<RpcState>,
    headers: HeaderMap,
    payload: Result<Json<DeleteItemRequest>, JsonRejection>,
) -> RpcResult<DeleteItemResponse> {
    let request = decode(payload)?;
    dispatch(DELETE_ITEM, &headers, state.catalog.delete_item(request)).await
}

/// Router serving the five catalog methods
pub fn rpc_router(catalog: Arc<dyn CatalogRpc>) -> Router {
    Router::new()
        .route(&method_path(LIST_ITEMS), post(list_items))
        .route(&method_path(GET_ITEM), post(get_item))
        .route(&method_path(CREATE_ITEM), post(create_item))
        .route(&method_path(UPDATE_ITEM), post(update_item))
        .route(&method_path(DELETE_ITEM), post(delete_item))
        .with_state(RpcState { catalog })
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Plain HTTP router with the liveness endpoint
pub fn health_router() -> Router {
    Router::new().route("/health", get(health))
}
