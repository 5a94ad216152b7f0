//! Port for applying and inspecting schema migrations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;

define_port_error! {
    /// Failures raised by schema migration adapters.
    pub enum SchemaMigratorError {
        /// The database could not be reached.
        Connection { message: String } => "could not connect to the database: {message}",
        /// A migration or status query failed.
        Migration { message: String } => "migration failed: {message}",
    }
}

/// A migration recorded as applied by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    /// Migration version identifier.
    pub version: String,
    /// When the migration ran, if the store records it.
    pub run_on: Option<DateTime<Utc>>,
}

/// Snapshot of the schema as seen by the migrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Presence of each application table, keyed by table name.
    pub tables: BTreeMap<String, bool>,
    /// Total number of applied migrations.
    pub applied_count: usize,
    /// Most recently applied migrations, newest first.
    pub recent: Vec<AppliedMigration>,
}

/// Tables the application expects after migrating.
pub const APPLICATION_TABLES: [&str; 3] = ["users", "organizations", "test_entities"];

/// Number of recent migrations reported by [`SchemaMigrator::status`].
pub const RECENT_MIGRATIONS_LIMIT: usize = 5;

/// Applies embedded migrations and reports schema state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaMigrator: Send + Sync {
    /// Run every pending migration, returning the versions applied.
    async fn apply_pending(&self) -> Result<Vec<String>, SchemaMigratorError>;

    /// Inspect table presence and migration history.
    async fn status(&self) -> Result<SchemaStatus, SchemaMigratorError>;
}
