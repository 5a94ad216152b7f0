//! Port for checking that the backing database answers queries.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures raised while probing the database.
    pub enum DatabaseProbeError {
        /// No connection could be checked out or opened.
        Connection { message: String } => "{message}",
        /// The probe query failed.
        Query { message: String } => "{message}",
    }
}

/// Runs a trivial round-trip query against the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Execute `SELECT 1` (or the adapter's equivalent).
    async fn ping(&self) -> Result<(), DatabaseProbeError>;
}
