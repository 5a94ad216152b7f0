//! Round-trip probe against PostgreSQL for the health endpoint.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DatabaseProbe, DatabaseProbeError};

use super::pool::DbPool;

/// Runs `SELECT 1` on a pooled connection.
#[derive(Clone)]
pub struct DieselDatabaseProbe {
    pool: DbPool,
}

impl DieselDatabaseProbe {
    /// Create a probe over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseProbe for DieselDatabaseProbe {
    async fn ping(&self) -> Result<(), DatabaseProbeError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| DatabaseProbeError::connection(err.message()))?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| DatabaseProbeError::query(err.to_string()))
    }
}
