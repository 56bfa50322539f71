//! Service configuration, read once at startup from the environment.

use std::net::SocketAddr;

use anyhow::{Context as _, Result};

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const ADDRESS: &str = "SWIMDASH_ADDRESS";
pub const MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "swimdash=info,tower_http=info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Connection string for the Postgres backend
    pub database_url: String,
    /// Where the HTTP server listens
    pub address: SocketAddr,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
}

impl Config {
    /// Loads the configuration from the process environment.
    ///
    /// Call `dotenv::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = var(DATABASE_URL)
            .filter(|url| !url.is_empty())
            .context("No database URL provided")?;

        let address = var(ADDRESS).unwrap_or_else(|| DEFAULT_ADDRESS.to_owned());
        let address = address
            .parse()
            .with_context(|| format!("Invalid {} value: {}", ADDRESS, address))?;

        let max_connections = match var(MAX_CONNECTIONS) {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid {} value: {}", MAX_CONNECTIONS, value))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            address,
            max_connections,
        })
    }
}
