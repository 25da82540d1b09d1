//! Catalog service configuration loaded from the environment.

use anyhow::{Context, Result};
use catalog_core::config::{env_parse, env_string, process_env};
use catalog_storage::{default_database_path, DATABASE_FILE};
use std::net::SocketAddr;

pub const DEFAULT_RPC_PORT: u16 = 50051;
pub const DEFAULT_HTTP_PORT: u16 = 8081;

#[derive(Debug, Clone)]
pub struct CatalogServiceConfig {
    /// Host both listeners bind to
    pub host: String,
    /// SQLite file path, or `:memory:`
    pub database_url: String,
    pub rpc_port: u16,
    /// Port for the health endpoint
    pub http_port: u16,
}

impl Default for CatalogServiceConfig {
    fn default() -> Self {
        let database_url = default_database_path()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| DATABASE_FILE.to_string());

        Self {
            host: "0.0.0.0".to_string(),
            database_url,
            rpc_port: DEFAULT_RPC_PORT,
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

impl CatalogServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = env_string(&lookup, "CATALOG_SERVICE_HOST") {
            config.host = host;
        }
        if let Some(url) = env_string(&lookup, "DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(port) = env_parse(&lookup, "RPC_PORT")? {
            config.rpc_port = port;
        }
        if let Some(port) = env_parse(&lookup, "HTTP_PORT")? {
            config.http_port = port;
        }

        Ok(config)
    }

    pub fn rpc_addr(&self) -> Result<SocketAddr> {
        socket_addr(&self.host, self.rpc_port)
    }

    pub fn http_addr(&self) -> Result<SocketAddr> {
        socket_addr(&self.host, self.http_port)
    }
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr> {
    format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))
}
