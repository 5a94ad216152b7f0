//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique constraint rejected the write.
        UniqueViolation { field: String } => "user {field} already exists",
    }
}

/// Storage contract for [`User`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, newest first.
    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a user. Timestamps are assigned by the store.
    ///
    /// A duplicate email yields [`UserRepositoryError::UniqueViolation`].
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Apply a partial update.
    ///
    /// Returns `Ok(None)` when no row matches or the store rejected the new
    /// values (dangling organization reference).
    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Hard-delete a user, reporting whether a row was removed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError>;
}
