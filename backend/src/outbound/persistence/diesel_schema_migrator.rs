//! Embedded Diesel migrations and schema inspection.
//!
//! `diesel_migrations` drives a synchronous [`PgConnection`], so every call
//! here runs on Tokio's blocking pool.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Text, Timestamp};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::{
    APPLICATION_TABLES, AppliedMigration, RECENT_MIGRATIONS_LIMIT, SchemaMigrator,
    SchemaMigratorError, SchemaStatus,
};

/// Migrations compiled into the binary from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Bookkeeping table maintained by Diesel's migration harness.
const MIGRATIONS_TABLE: &str = "__diesel_schema_migrations";

#[derive(QueryableByName)]
struct TablePresence {
    #[diesel(sql_type = Bool)]
    present: bool,
}

#[derive(QueryableByName)]
struct MigrationCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct MigrationRow {
    #[diesel(sql_type = Text)]
    version: String,
    #[diesel(sql_type = Timestamp)]
    run_on: NaiveDateTime,
}

fn connect(database_url: &str) -> Result<PgConnection, SchemaMigratorError> {
    PgConnection::establish(database_url)
        .map_err(|err| SchemaMigratorError::connection(err.to_string()))
}

/// Apply all pending embedded migrations, returning the applied versions.
///
/// Blocking; call from a blocking context.
///
/// # Errors
/// Returns [`SchemaMigratorError`] when the database is unreachable or a
/// migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, SchemaMigratorError> {
    let mut conn = connect(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| SchemaMigratorError::migration(err.to_string()))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    info!(count = applied.len(), "embedded migrations applied");
    Ok(applied)
}

fn table_present(conn: &mut PgConnection, table: &str) -> Result<bool, SchemaMigratorError> {
    diesel::sql_query(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = $1) AS present",
    )
    .bind::<Text, _>(table)
    .get_result::<TablePresence>(conn)
    .map(|row| row.present)
    .map_err(|err| SchemaMigratorError::migration(err.to_string()))
}

fn inspect(database_url: &str) -> Result<SchemaStatus, SchemaMigratorError> {
    let mut conn = connect(database_url)?;

    let mut tables = BTreeMap::new();
    for table in APPLICATION_TABLES {
        tables.insert(table.to_owned(), table_present(&mut conn, table)?);
    }

    // Inspection stays read-only: an unmigrated database has no bookkeeping
    // table and Diesel's harness would create one.
    if !table_present(&mut conn, MIGRATIONS_TABLE)? {
        return Ok(SchemaStatus {
            tables,
            applied_count: 0,
            recent: Vec::new(),
        });
    }

    let applied = diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {MIGRATIONS_TABLE}"))
        .get_result::<MigrationCount>(&mut conn)
        .map_err(|err| SchemaMigratorError::migration(err.to_string()))?
        .count;
    let applied_count = usize::try_from(applied).unwrap_or(0);

    let limit = i64::try_from(RECENT_MIGRATIONS_LIMIT).unwrap_or(i64::MAX);
    let recent = diesel::sql_query(format!(
        "SELECT version, run_on FROM {MIGRATIONS_TABLE} \
         ORDER BY run_on DESC, version DESC LIMIT $1"
    ))
    .bind::<BigInt, _>(limit)
    .load::<MigrationRow>(&mut conn)
    .map_err(|err| SchemaMigratorError::migration(err.to_string()))?
    .into_iter()
    .map(|row| AppliedMigration {
        version: row.version,
        run_on: Some(row.run_on.and_utc()),
    })
    .collect();

    Ok(SchemaStatus {
        tables,
        applied_count,
        recent,
    })
}

/// [`SchemaMigrator`] backed by the embedded Diesel migrations.
#[derive(Debug, Clone)]
pub struct DieselSchemaMigrator {
    database_url: String,
}

impl DieselSchemaMigrator {
    /// Create a migrator connecting to `database_url` on demand.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

async fn on_blocking_pool<T, F>(work: F) -> Result<T, SchemaMigratorError>
where
    F: FnOnce() -> Result<T, SchemaMigratorError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| SchemaMigratorError::migration(format!("migration task failed: {err}")))?
}

#[async_trait]
impl SchemaMigrator for DieselSchemaMigrator {
    async fn apply_pending(&self) -> Result<Vec<String>, SchemaMigratorError> {
        let url = self.database_url.clone();
        on_blocking_pool(move || run_pending_migrations(&url)).await
    }

    async fn status(&self) -> Result<SchemaStatus, SchemaMigratorError> {
        let url = self.database_url.clone();
        on_blocking_pool(move || inspect(&url)).await
    }
}
