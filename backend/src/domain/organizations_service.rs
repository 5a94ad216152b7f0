//! Organization management use cases.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::organization::{normalise_document, normalise_organization_name};
use crate::domain::ports::{
    CreateOrganizationRequest, OrganizationRepository, OrganizationRepositoryError,
    OrganizationsCommand, OrganizationsQuery, UpdateOrganizationRequest,
};
use crate::domain::{
    Error, ErrorCode, NewOrganization, Organization, OrganizationChanges, OrganizationId,
};

fn name_taken() -> Error {
    Error::new(
        ErrorCode::NameAlreadyExists,
        "Organization with this name already exists",
    )
    .with_details(json!({ "field": "name" }))
}

fn document_taken() -> Error {
    Error::new(
        ErrorCode::DocumentAlreadyExists,
        "Organization with this document already exists",
    )
    .with_details(json!({ "field": "document" }))
}

fn organization_not_found() -> Error {
    Error::not_found("Organization not found")
}

fn map_repository_error(error: OrganizationRepositoryError) -> Error {
    match error {
        OrganizationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("organization repository unavailable: {message}"))
        }
        OrganizationRepositoryError::Query { message } => {
            Error::internal(format!("organization repository error: {message}"))
        }
        OrganizationRepositoryError::UniqueViolation { field } if field == "document" => {
            document_taken()
        }
        OrganizationRepositoryError::UniqueViolation { .. } => name_taken(),
    }
}

/// Organization service implementing [`OrganizationsCommand`] and
/// [`OrganizationsQuery`].
#[derive(Clone)]
pub struct OrganizationsService<R> {
    repository: Arc<R>,
}

impl<R> OrganizationsService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> OrganizationsService<R>
where
    R: OrganizationRepository,
{
    /// Reject `name`/`document` when another organization already holds them.
    ///
    /// `exclude` skips the organization being updated.
    async fn ensure_unique(
        &self,
        name: Option<&str>,
        document: Option<&str>,
        exclude: Option<&OrganizationId>,
    ) -> Result<(), Error> {
        let is_other = |found: &Organization| exclude != Some(&found.id);

        if let Some(name) = name {
            let found = self
                .repository
                .find_by_name(name)
                .await
                .map_err(map_repository_error)?;
            if found.as_ref().is_some_and(is_other) {
                warn!("organization rejected: name already in use");
                return Err(name_taken());
            }
        }
        if let Some(document) = document {
            let found = self
                .repository
                .find_by_document(document)
                .await
                .map_err(map_repository_error)?;
            if found.as_ref().is_some_and(is_other) {
                warn!("organization rejected: document already in use");
                return Err(document_taken());
            }
        }
        Ok(())
    }

    async fn find_existing(&self, id: &OrganizationId) -> Result<Organization, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(organization_not_found)
    }
}

#[async_trait]
impl<R> OrganizationsCommand for OrganizationsService<R>
where
    R: OrganizationRepository,
{
    async fn create(&self, request: CreateOrganizationRequest) -> Result<Organization, Error> {
        let name = normalise_organization_name(request.name.as_deref().unwrap_or_default())?;
        let document = normalise_document(request.document.as_deref());

        self.ensure_unique(Some(&name), document.as_deref(), None)
            .await?;

        let organization = self
            .repository
            .create(&NewOrganization {
                id: OrganizationId::random(),
                name,
                document,
            })
            .await
            .map_err(map_repository_error)?;

        info!(organization_id = %organization.id, "organization created");
        Ok(organization)
    }

    async fn update(&self, request: UpdateOrganizationRequest) -> Result<Organization, Error> {
        let UpdateOrganizationRequest { id, name, document } = request;
        let changes = OrganizationChanges {
            name: name
                .as_deref()
                .map(normalise_organization_name)
                .transpose()?,
            document: document.map(|value| normalise_document(value.as_deref())),
        };

        if changes.is_empty() {
            return self.find_existing(&id).await;
        }
        self.ensure_unique(
            changes.name.as_deref(),
            changes.document.as_ref().and_then(Option::as_deref),
            Some(&id),
        )
        .await?;

        let updated = self
            .repository
            .update(&id, &changes)
            .await
            .map_err(map_repository_error)?;
        match updated {
            Some(organization) => {
                info!(organization_id = %organization.id, "organization updated");
                Ok(organization)
            }
            None => {
                // Still present means a concurrent writer claimed a value
                // after the pre-check; look again to name the right field.
                self.find_existing(&id).await?;
                self.ensure_unique(
                    changes.name.as_deref(),
                    changes.document.as_ref().and_then(Option::as_deref),
                    Some(&id),
                )
                .await?;
                if changes.name.is_some() {
                    Err(name_taken())
                } else {
                    Err(document_taken())
                }
            }
        }
    }

    async fn delete(&self, id: &OrganizationId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if removed {
            info!(organization_id = %id, "organization deleted");
            Ok(())
        } else {
            Err(organization_not_found())
        }
    }
}

#[async_trait]
impl<R> OrganizationsQuery for OrganizationsService<R>
where
    R: OrganizationRepository,
{
    async fn list(&self) -> Result<Vec<Organization>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: &OrganizationId) -> Result<Organization, Error> {
        self.find_existing(id).await
    }
}

#[cfg(test)]
#[path = "organizations_service_tests.rs"]
mod tests;
