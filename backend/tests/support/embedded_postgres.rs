//! Per-test databases cloned from a migrated template.
//!
//! The template is named after a hash of `backend/migrations`, so editing a
//! migration provisions a fresh one. Raw SQL helpers use `postgres` rather
//! than Diesel so seeding and inspection stay outside the code under test.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use stockflow::domain::ports::SchemaMigratorError;
use stockflow::outbound::persistence::run_pending_migrations;
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "stockflow_template";
const PROVISION_RETRIES: usize = 5;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, SchemaMigratorError> {
    let hash = hash_directory(migrations_dir())
        .map_err(|err| SchemaMigratorError::migration(format!("hash migrations: {err}")))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn new_database_name() -> String {
    format!("test_{}", Uuid::new_v4().simple())
}

/// Creates the template on first use and applies the embedded migrations.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, SchemaMigratorError> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| SchemaMigratorError::connection(format!("template check: {err:?}")))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| SchemaMigratorError::connection(format!("create template: {err:?}")))?;
        run_pending_migrations(&cluster.connection().database_url(&template_name))?;
    }

    Ok(template_name)
}

/// Provisions a migrated database that is dropped with the returned guard.
pub fn provision_template_database(
    cluster: &ClusterHandle,
) -> Result<TemporaryDatabase, SchemaMigratorError> {
    let mut last_error = SchemaMigratorError::migration("template provisioning never ran");
    for attempt in 1..=PROVISION_RETRIES {
        let provisioned = ensure_template_database(cluster).and_then(|template_name| {
            cluster
                .temporary_database_from_template(new_database_name().as_str(), template_name.as_str())
                .map_err(|err| {
                    SchemaMigratorError::migration(format!(
                        "clone template: attempt {attempt}/{PROVISION_RETRIES}: {err:?}"
                    ))
                })
        });
        match provisioned {
            Ok(database) => return Ok(database),
            Err(err) => last_error = err,
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// Creates an empty database with no migrations applied, returning its URL.
pub fn provision_empty_database(cluster: &ClusterHandle) -> Result<String, SchemaMigratorError> {
    let name = new_database_name();
    cluster
        .create_database(name.as_str())
        .map_err(|err| SchemaMigratorError::connection(format!("create database: {err:?}")))?;
    Ok(cluster.connection().database_url(&name))
}

/// Opens a raw client for seeding and inspecting rows.
pub fn raw_client(url: &str) -> Result<Client, String> {
    Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))
}

/// Returns whether `table` exists in the public schema.
pub fn table_exists(url: &str, table: &str) -> Result<bool, String> {
    let mut client = raw_client(url)?;
    let row = client
        .query_one(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_name = $1)",
            &[&table],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}
