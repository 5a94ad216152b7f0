//! PostgreSQL-backed `OrganizationRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OrganizationRepository, OrganizationRepositoryError};
use crate::domain::{NewOrganization, Organization, OrganizationChanges, OrganizationId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, unique_field};
use super::models::{NewOrganizationRow, OrganizationChangeset, OrganizationRow};
use super::pool::{DbPool, PoolError};
use super::schema::organizations;

/// Diesel-backed implementation of the [`OrganizationRepository`] port.
///
/// Deleting an organization relies on the `ON DELETE SET NULL` foreign key to
/// detach affiliated users.
#[derive(Clone)]
pub struct DieselOrganizationRepository {
    pool: DbPool,
}

impl DieselOrganizationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrganizationRepositoryError {
    OrganizationRepositoryError::connection(error.message())
}

fn map_failure(failure: DieselFailure) -> OrganizationRepositoryError {
    match failure {
        DieselFailure::Connection(message) => OrganizationRepositoryError::connection(message),
        DieselFailure::Query(message) => OrganizationRepositoryError::query(message),
        DieselFailure::UniqueViolation { constraint } => {
            OrganizationRepositoryError::unique_violation(unique_field(constraint.as_deref()))
        }
        DieselFailure::ForeignKeyViolation => {
            OrganizationRepositoryError::query("foreign key violation")
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> OrganizationRepositoryError {
    map_failure(classify_diesel_error(error))
}

#[async_trait]
impl OrganizationRepository for DieselOrganizationRepository {
    async fn find_all(&self) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<OrganizationRow> = organizations::table
            .select(OrganizationRow::as_select())
            .order(organizations::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Organization::from).collect())
    }

    async fn find_by_id(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OrganizationRow> = organizations::table
            .find(*id.as_uuid())
            .select(OrganizationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Organization::from))
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OrganizationRow> = organizations::table
            .filter(organizations::name.eq(name))
            .select(OrganizationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Organization::from))
    }

    async fn find_by_document(
        &self,
        document: &str,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OrganizationRow> = organizations::table
            .filter(organizations::document.eq(document))
            .select(OrganizationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Organization::from))
    }

    async fn create(
        &self,
        organization: &NewOrganization,
    ) -> Result<Organization, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewOrganizationRow {
            id: *organization.id.as_uuid(),
            name: &organization.name,
            document: organization.document.as_deref(),
        };

        let row: OrganizationRow = diesel::insert_into(organizations::table)
            .values(&new_row)
            .returning(OrganizationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: &OrganizationId,
        changes: &OrganizationChanges,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = diesel::update(organizations::table.find(*id.as_uuid()))
            .set(OrganizationChangeset::from(changes))
            .returning(OrganizationRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional();

        match result {
            Ok(row) => Ok(row.map(Organization::from)),
            Err(error) => match classify_diesel_error(error) {
                DieselFailure::UniqueViolation { .. } => Ok(None),
                other => Err(map_failure(other)),
            },
        }
    }

    async fn delete(&self, id: &OrganizationId) -> Result<bool, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(organizations::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
