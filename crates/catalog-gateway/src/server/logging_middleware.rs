//! HTTP Request/Response Logging Middleware
//!
//! Emits one access-log line per request with a trace ID for correlation.
//! Bodies are logged at DEBUG level only.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::net::SocketAddr;
use tracing::{debug, warn, Instrument};

use super::error::ApiError;
use crate::logging::{RequestSpan, TraceContext};

/// Maximum body size to log (64KB)
const MAX_BODY_LOG_SIZE: usize = 64 * 1024;

/// Largest request body buffered here, same as the `Json` extractor's default
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Longest text fragment written to the log
const MAX_TEXT_LOG_LEN: usize = 200;

/// Format bytes as a short log-friendly string
pub fn format_body(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "[empty]".to_string();
    }

    if bytes.len() > MAX_BODY_LOG_SIZE {
        return format!("[{} bytes]", bytes.len());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => {
            let compact = serde_json::from_str::<serde_json::Value>(text)
                .ok()
                .and_then(|json| serde_json::to_string(&json).ok())
                .unwrap_or_else(|| text.to_string());
            truncate(&compact, MAX_TEXT_LOG_LEN)
        }
        Err(_) => format!("[binary: {} bytes]", bytes.len()),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

fn client_ip(request: &Request) -> Option<String> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}

/// Logging middleware for requests and responses
pub async fn http_logging_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let ctx = TraceContext::new(request.method().as_str(), request.uri().path())
        .with_query(request.uri().query())
        .with_client_ip(client_ip(&request));
    let span = RequestSpan::enter(&ctx);

    async move {
        let (parts, body) = request.into_parts();
        let body_bytes = match Limited::new(body, MAX_REQUEST_BODY_SIZE).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) if e.is::<LengthLimitError>() => {
                warn!(trace_id = %ctx.trace_id, "Request body exceeds {} bytes", MAX_REQUEST_BODY_SIZE);
                RequestSpan::log_exit(&ctx, StatusCode::PAYLOAD_TOO_LARGE.as_u16());
                return Ok(
                    ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "request body too large")
                        .into_response(),
                );
            }
            Err(e) => {
                warn!(trace_id = %ctx.trace_id, "Failed to read request body: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        };

        if !body_bytes.is_empty() {
            debug!(trace_id = %ctx.trace_id, body = %format_body(&body_bytes), "Request body");
        }

        let request = Request::from_parts(parts, Body::from(body_bytes));

        let response = next.run(request).await;

        let (parts, body) = response.into_parts();
        let body_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(trace_id = %ctx.trace_id, "Failed to read response body: {}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        if !body_bytes.is_empty() {
            debug!(trace_id = %ctx.trace_id, body = %format_body(&body_bytes), "Response body");
        }

        RequestSpan::log_exit(&ctx, parts.status.as_u16());

        Ok(Response::from_parts(parts, Body::from(body_bytes)))
    }
    .instrument(span)
    .await
}
