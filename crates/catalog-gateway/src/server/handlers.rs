//! HTTP handlers for the gateway server
//!
//! Each handler parses untyped HTTP input into a typed RPC request, makes a
//! single deadline-bounded backend call, and maps the outcome to a response.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use catalog_core::{
    effective_limit, CatalogRpc, CreateItemRequest, DeleteItemRequest, DeleteItemResponse,
    GetItemRequest, Item, ItemPage, ItemPatch, ListItemsRequest, UpdateItemRequest,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::deadline::with_deadline;
use super::error::{ApiError, ApiResult};

/// Shared state for every route. Holds only immutable handles.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRpc>,
    pub call_timeout: Duration,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    debug!("[Gateway] Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Raw list query; integers are parsed by hand so failures map to 400.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// Comma-separated; any value narrows to items that have tags
    pub tags: Option<String>,
}

/// Create body: every field is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemBody {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image_url: String,
}

impl From<CreateItemBody> for CreateItemRequest {
    fn from(body: CreateItemBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            tags: body.tags,
            image_url: body.image_url,
        }
    }
}

fn parse_int(name: &str, raw: Option<&str>, default: i32) -> ApiResult<i32> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<i32>()
            .map_err(|_| ApiError::bad_request(format!("invalid {}: must be an integer", name))),
    }
}

fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

impl ListParams {
    /// Validate into an RPC request
    pub fn into_request(self) -> ApiResult<ListItemsRequest> {
        let page = parse_int("page", self.page.as_deref(), 1)?;
        if page < 1 {
            return Err(ApiError::bad_request("invalid page: must be a positive integer"));
        }
        let limit = effective_limit(parse_int("limit", self.limit.as_deref(), 10)?);

        Ok(ListItemsRequest {
            page,
            limit,
            tags: parse_tags(self.tags.as_deref()),
        })
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// GET /items
pub async fn list_items(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<ItemPage>> {
    let Query(params) = params.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let request = params.into_request()?;

    let page = with_deadline(state.call_timeout, state.catalog.list_items(request)).await?;
    Ok(Json(page))
}

/// GET /items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    let item = with_deadline(
        state.call_timeout,
        state.catalog.get_item(GetItemRequest { id }),
    )
    .await?;
    Ok(Json(item))
}

/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemBody>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let body = json_body(payload)?;

    let item = with_deadline(state.call_timeout, state.catalog.create_item(body.into())).await?;
    Ok(Json(item))
}

/// PUT /items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ItemPatch>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let patch = json_body(payload)?;

    let item = with_deadline(
        state.call_timeout,
        state.catalog.update_item(UpdateItemRequest { id, patch }),
    )
    .await?;
    Ok(Json(item))
}

/// DELETE /items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteItemResponse>> {
    let response = with_deadline(
        state.call_timeout,
        state.catalog.delete_item(DeleteItemRequest { id }),
    )
    .await?;
    Ok(Json(response))
}
