//! Scaffolding entity used to exercise the full request pipeline.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Error, ErrorCode, TestEntityId};

/// Maximum length, in characters, of a test entity name.
pub const TEST_ENTITY_NAME_MAX: usize = 255;

/// Validation errors raised while building test entity inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestEntityValidationError {
    #[error("Name is required and cannot be empty")]
    EmptyName,
    #[error("Name must be between 1 and {max} characters")]
    NameLength { max: usize },
    #[error("Status must be one of: active, inactive, pending")]
    Status,
}

impl From<TestEntityValidationError> for Error {
    fn from(value: TestEntityValidationError) -> Self {
        let (code, field) = match value {
            TestEntityValidationError::EmptyName => (ErrorCode::InvalidName, "name"),
            TestEntityValidationError::NameLength { .. } => (ErrorCode::InvalidNameLength, "name"),
            TestEntityValidationError::Status => (ErrorCode::InvalidStatus, "status"),
        };
        Self::validation(code, field, value.to_string())
    }
}

/// Trim and length-check a test entity name.
///
/// # Errors
/// Returns [`TestEntityValidationError::EmptyName`] or
/// [`TestEntityValidationError::NameLength`].
pub fn normalise_test_entity_name(raw: &str) -> Result<String, TestEntityValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TestEntityValidationError::EmptyName);
    }
    if trimmed.chars().count() > TEST_ENTITY_NAME_MAX {
        return Err(TestEntityValidationError::NameLength {
            max: TEST_ENTITY_NAME_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

/// Lifecycle state of a test entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestEntityStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl TestEntityStatus {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for TestEntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestEntityStatus {
    type Err = TestEntityValidationError;

    /// Parse after trimming; matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            _ => Err(TestEntityValidationError::Status),
        }
    }
}

/// Stored test entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEntity {
    pub id: TestEntityId,
    pub name: String,
    pub status: TestEntityStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated insert payload handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestEntity {
    pub id: TestEntityId,
    pub name: String,
    pub status: TestEntityStatus,
}
