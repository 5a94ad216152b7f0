//! Shared helpers for the database-backed integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! suites pull these in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{
    provision_empty_database, provision_template_database, raw_client, table_exists,
};

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// `Display` collapses database errors to `db error`, hiding the message and
/// SQLSTATE.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
