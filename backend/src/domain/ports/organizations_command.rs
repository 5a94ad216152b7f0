//! Driving port for organization mutations.

use async_trait::async_trait;

use crate::domain::{Error, Organization, OrganizationId};

/// Raw organization creation input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOrganizationRequest {
    /// Organization name.
    pub name: Option<String>,
    /// Optional registration document (tax id or similar).
    pub document: Option<String>,
}

/// Partial organization update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOrganizationRequest {
    /// Organization being updated.
    pub id: OrganizationId,
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement or cleared document.
    pub document: Option<Option<String>>,
}

/// Use cases that create or change organizations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationsCommand: Send + Sync {
    /// Validate and store a new organization.
    async fn create(&self, request: CreateOrganizationRequest) -> Result<Organization, Error>;

    /// Apply a partial update to an existing organization.
    async fn update(&self, request: UpdateOrganizationRequest) -> Result<Organization, Error>;

    /// Remove an organization, detaching its users.
    async fn delete(&self, id: &OrganizationId) -> Result<(), Error>;
}
