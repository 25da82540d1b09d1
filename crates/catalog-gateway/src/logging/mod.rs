//! Centralized Logging Infrastructure
//!
//! Provides structured logging with:
//! - Trace IDs for request correlation
//! - A single consolidated access-log line per request

mod trace_context;

pub use trace_context::{generate_trace_id, RequestSpan, TraceContext};
