//! Driving port for operator-triggered schema maintenance.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::Error;

use super::SchemaStatus;

/// Result of a maintenance migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRun {
    /// Versions applied by this run; empty when already up to date.
    pub applied: Vec<String>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

/// Token-guarded migration use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaMaintenance: Send + Sync {
    /// Apply pending migrations after checking `token` against the configured
    /// maintenance token.
    ///
    /// A mismatch, or no configured token, yields
    /// [`crate::domain::ErrorCode::Forbidden`].
    async fn migrate(&self, token: &str) -> Result<MigrationRun, Error>;

    /// Report table presence and migration history.
    async fn status(&self) -> Result<SchemaStatus, Error>;
}
