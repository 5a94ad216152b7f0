//! Driving ports for the scaffolding test entity.

use async_trait::async_trait;

use crate::domain::{Error, TestEntity, TestEntityId};

/// Raw test entity creation input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTestEntityRequest {
    /// Entity name.
    pub name: Option<String>,
    /// Optional status; defaults to `active`.
    pub status: Option<String>,
}

/// Use cases that create or remove test entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestEntitiesCommand: Send + Sync {
    /// Validate and store a new entity.
    async fn create(&self, request: CreateTestEntityRequest) -> Result<TestEntity, Error>;

    /// Remove an entity.
    async fn delete(&self, id: &TestEntityId) -> Result<(), Error>;
}

/// Read-only test entity use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestEntitiesQuery: Send + Sync {
    /// Every entity, newest first.
    async fn list(&self) -> Result<Vec<TestEntity>, Error>;

    /// A single entity, or [`crate::domain::ErrorCode::NotFound`].
    async fn get(&self, id: &TestEntityId) -> Result<TestEntity, Error>;
}
