//! Server configuration loaded from the process environment

use anyhow::{Context, Result};
use config::{Config, Environment, Map};
use serde::Deserialize;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Document store connection string; unset means fallback mode
    #[serde(default)]
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Read `DATABASE_URL`, `HOST` and `PORT` from the environment
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load from `vars` instead of the process environment when given
    fn load(vars: Option<Map<String, String>>) -> Result<Self> {
        let mut settings: Settings = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(Environment::default().source(vars))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.database_url = settings
            .database_url
            .take()
            .filter(|url| !url.trim().is_empty());
        Ok(settings)
    }

    /// Resolve `host` (IP literal, bracketed IPv6 or hostname) and `port`
    pub async fn bind_address(&self) -> Result<SocketAddr> {
        let host = self.host.trim_start_matches('[').trim_end_matches(']');
        tokio::net::lookup_host((host, self.port))
            .await
            .with_context(|| format!("Failed to resolve bind host {}", self.host))?
            .next()
            .with_context(|| format!("No address found for bind host {}", self.host))
    }
}
