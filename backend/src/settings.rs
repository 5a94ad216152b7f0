//! Application settings loaded via OrthoConfig.
//!
//! Values come from command-line flags, `STOCKFLOW_*` environment variables
//! and configuration files, in OrthoConfig's usual precedence. The database
//! URL additionally honours the conventional `DATABASE_URL` variable.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

/// Address the HTTP server binds to when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Fallback variable consulted when `STOCKFLOW_DATABASE_URL` is unset.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        /// Offending value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Runtime configuration for the StockFlow server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOCKFLOW")]
pub struct AppSettings {
    /// PostgreSQL connection string. In-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Apply pending migrations before the server starts.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Bearer token accepted by `POST /api/migrate`.
    pub migration_token: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl AppSettings {
    /// Configured database URL, falling back to `DATABASE_URL`.
    ///
    /// Blank values count as unset.
    pub fn database_url(&self) -> Option<String> {
        non_blank(self.database_url.clone())
            .or_else(|| non_blank(std::env::var(DATABASE_URL_ENV).ok()))
    }

    /// Maintenance token, ignoring blank values.
    pub fn migration_token(&self) -> Option<String> {
        non_blank(self.migration_token.clone())
    }

    /// Parsed listen address.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool size, falling back to [`DEFAULT_MAX_CONNECTIONS`].
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}
