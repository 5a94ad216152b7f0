//! Driving port for organization queries.

use async_trait::async_trait;

use crate::domain::{Error, Organization, OrganizationId};

/// Read-only organization use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationsQuery: Send + Sync {
    /// Every organization, newest first.
    async fn list(&self) -> Result<Vec<Organization>, Error>;

    /// A single organization, or [`crate::domain::ErrorCode::NotFound`].
    async fn get(&self, id: &OrganizationId) -> Result<Organization, Error>;
}
