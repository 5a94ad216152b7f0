//! Token-guarded schema maintenance.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::ports::{
    MigrationRun, SchemaMaintenance, SchemaMigrator, SchemaMigratorError, SchemaStatus,
};

fn map_migrator_error(error: SchemaMigratorError) -> Error {
    match error {
        SchemaMigratorError::Connection { message } => {
            Error::internal(format!("could not connect to the database: {message}"))
        }
        SchemaMigratorError::Migration { message } => {
            Error::internal(format!("migration failed: {message}"))
        }
    }
}

/// Compare without short-circuiting on the first differing byte.
fn tokens_match(expected: &str, supplied: &str) -> bool {
    let (expected, supplied) = (expected.as_bytes(), supplied.as_bytes());
    expected.len() == supplied.len()
        && expected
            .iter()
            .zip(supplied)
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Service implementing [`SchemaMaintenance`].
///
/// With no token configured every migration request is refused.
#[derive(Clone)]
pub struct MaintenanceService<M> {
    migrator: Arc<M>,
    token: Option<String>,
}

impl<M> MaintenanceService<M> {
    /// Create a service guarded by `token`.
    pub fn new(migrator: Arc<M>, token: Option<String>) -> Self {
        Self { migrator, token }
    }
}

#[async_trait]
impl<M> SchemaMaintenance for MaintenanceService<M>
where
    M: SchemaMigrator,
{
    async fn migrate(&self, token: &str) -> Result<MigrationRun, Error> {
        let authorised = self
            .token
            .as_deref()
            .is_some_and(|expected| tokens_match(expected, token));
        if !authorised {
            warn!("migration request rejected: invalid maintenance token");
            return Err(Error::forbidden("Invalid token"));
        }

        let applied = self
            .migrator
            .apply_pending()
            .await
            .map_err(map_migrator_error)?;
        info!(count = applied.len(), "maintenance migrations applied");

        Ok(MigrationRun {
            applied,
            finished_at: Utc::now(),
        })
    }

    async fn status(&self) -> Result<SchemaStatus, Error> {
        self.migrator.status().await.map_err(map_migrator_error)
    }
}
