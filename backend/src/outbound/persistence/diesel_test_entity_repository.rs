//! PostgreSQL-backed `TestEntityRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TestEntityRepository, TestEntityRepositoryError};
use crate::domain::{NewTestEntity, TestEntity, TestEntityId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewTestEntityRow, TestEntityRow};
use super::pool::{DbPool, PoolError};
use super::schema::test_entities;

/// Diesel-backed implementation of the [`TestEntityRepository`] port.
#[derive(Clone)]
pub struct DieselTestEntityRepository {
    pool: DbPool,
}

impl DieselTestEntityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TestEntityRepositoryError {
    TestEntityRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> TestEntityRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => TestEntityRepositoryError::connection(message),
        DieselFailure::Query(message) => TestEntityRepositoryError::query(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation => {
            TestEntityRepositoryError::query("constraint violation")
        }
    }
}

#[async_trait]
impl TestEntityRepository for DieselTestEntityRepository {
    async fn find_all(&self) -> Result<Vec<TestEntity>, TestEntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TestEntityRow> = test_entities::table
            .select(TestEntityRow::as_select())
            .order(test_entities::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(TestEntity::from).collect())
    }

    async fn find_by_id(
        &self,
        id: &TestEntityId,
    ) -> Result<Option<TestEntity>, TestEntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TestEntityRow> = test_entities::table
            .find(*id.as_uuid())
            .select(TestEntityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(TestEntity::from))
    }

    async fn create(&self, entity: &NewTestEntity) -> Result<TestEntity, TestEntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTestEntityRow {
            id: *entity.id.as_uuid(),
            name: &entity.name,
            status: entity.status.as_str(),
        };

        let row: TestEntityRow = diesel::insert_into(test_entities::table)
            .values(&new_row)
            .returning(TestEntityRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: &TestEntityId) -> Result<bool, TestEntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(test_entities::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
