//! Port abstraction for organization persistence adapters.

use async_trait::async_trait;

use crate::domain::{NewOrganization, Organization, OrganizationChanges, OrganizationId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by organization repository adapters.
    pub enum OrganizationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "organization repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "organization repository query failed: {message}",
        /// A unique constraint rejected the write; `field` is `name` or `document`.
        UniqueViolation { field: String } => "organization {field} already exists",
    }
}

/// Storage contract for [`Organization`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Every organization, newest first.
    async fn find_all(&self) -> Result<Vec<Organization>, OrganizationRepositoryError>;

    /// Fetch an organization by identifier.
    async fn find_by_id(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, OrganizationRepositoryError>;

    /// Fetch an organization by exact name.
    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, OrganizationRepositoryError>;

    /// Fetch an organization by exact document.
    async fn find_by_document(
        &self,
        document: &str,
    ) -> Result<Option<Organization>, OrganizationRepositoryError>;

    /// Insert an organization.
    async fn create(
        &self,
        organization: &NewOrganization,
    ) -> Result<Organization, OrganizationRepositoryError>;

    /// Apply a partial update; `Ok(None)` on missing row or unique conflict.
    async fn update(
        &self,
        id: &OrganizationId,
        changes: &OrganizationChanges,
    ) -> Result<Option<Organization>, OrganizationRepositoryError>;

    /// Hard-delete an organization. Affiliated users are detached by the store.
    async fn delete(&self, id: &OrganizationId) -> Result<bool, OrganizationRepositoryError>;
}
