//! Port abstraction for test entity persistence.

use async_trait::async_trait;

use crate::domain::{NewTestEntity, TestEntity, TestEntityId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by test entity repository adapters.
    pub enum TestEntityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "test entity repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "test entity repository query failed: {message}",
    }
}

/// Storage contract for [`TestEntity`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestEntityRepository: Send + Sync {
    /// Every entity, newest first.
    async fn find_all(&self) -> Result<Vec<TestEntity>, TestEntityRepositoryError>;

    /// Fetch an entity by identifier.
    async fn find_by_id(
        &self,
        id: &TestEntityId,
    ) -> Result<Option<TestEntity>, TestEntityRepositoryError>;

    /// Insert an entity.
    async fn create(&self, entity: &NewTestEntity) -> Result<TestEntity, TestEntityRepositoryError>;

    /// Hard-delete an entity, reporting whether a row was removed.
    async fn delete(&self, id: &TestEntityId) -> Result<bool, TestEntityRepositoryError>;
}
