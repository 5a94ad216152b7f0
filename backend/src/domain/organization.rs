//! Organization data model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Error, ErrorCode, OrganizationId};

/// Validation errors raised while building organization inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrganizationValidationError {
    #[error("Organization name is required")]
    EmptyName,
}

impl From<OrganizationValidationError> for Error {
    fn from(value: OrganizationValidationError) -> Self {
        match value {
            OrganizationValidationError::EmptyName => {
                Self::validation(ErrorCode::InvalidName, "name", value.to_string())
            }
        }
    }
}

/// Trim an organization name, rejecting blank input.
///
/// # Errors
/// Returns [`OrganizationValidationError::EmptyName`] for blank input.
pub fn normalise_organization_name(raw: &str) -> Result<String, OrganizationValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OrganizationValidationError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional registration document; blank means absent.
#[must_use]
pub fn normalise_document(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Tenant that users may be affiliated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub document: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated insert payload handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
    pub id: OrganizationId,
    pub name: String,
    pub document: Option<String>,
}

/// Partial update: `None` leaves a column untouched, `document: Some(None)`
/// clears the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationChanges {
    pub name: Option<String>,
    pub document: Option<Option<String>>,
}

impl OrganizationChanges {
    /// Whether the update touches no column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.document.is_none()
    }
}
