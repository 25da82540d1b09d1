//! Gateway configuration loaded from the environment.

use anyhow::{Context, Result};
use catalog_core::config::{env_bool, env_parse, env_string, process_env};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

use crate::server::deadline::DEFAULT_CALL_TIMEOUT;

pub const DEFAULT_GATEWAY_PORT: u16 = 8080;
pub const DEFAULT_CATALOG_SERVICE_ADDR: &str = "http://127.0.0.1:50051";

/// Gateway server configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the catalog service RPC endpoint
    pub catalog_service_addr: String,
    /// Enable CORS for browser access
    pub enable_cors: bool,
    /// Budget for each backend call
    pub call_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_GATEWAY_PORT,
            catalog_service_addr: DEFAULT_CATALOG_SERVICE_ADDR.to_string(),
            enable_cors: true,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Load from process environment (after `.env`, if the caller loaded one).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = env_string(&lookup, "GATEWAY_HOST") {
            config.host = host;
        }
        if let Some(port) = env_parse(&lookup, "GATEWAY_PORT")? {
            config.port = port;
        }
        if let Some(addr) = env_string(&lookup, "CATALOG_SERVICE_ADDR") {
            config.catalog_service_addr = parse_service_addr(&addr)?;
        }
        if let Some(enable) = env_bool(&lookup, "GATEWAY_ENABLE_CORS")? {
            config.enable_cors = enable;
        }
        if let Some(ms) = env_parse::<_, u64>(&lookup, "CATALOG_CALL_TIMEOUT_MS")? {
            config.call_timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Get the socket address
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// Accepts `host:port` as well as a full URL; returns the normalized URL.
fn parse_service_addr(raw: &str) -> Result<String> {
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };
    let url = Url::parse(&with_scheme)
        .with_context(|| format!("CATALOG_SERVICE_ADDR is invalid ({raw})"))?;
    if url.host_str().is_none() {
        anyhow::bail!("CATALOG_SERVICE_ADDR has no host ({raw})");
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
