//! Driving port for user-facing queries.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

/// Read-only user use cases. Results never carry password hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user, newest first.
    async fn list(&self) -> Result<Vec<UserProfile>, Error>;

    /// A single user, or [`crate::domain::ErrorCode::NotFound`].
    async fn get(&self, id: &UserId) -> Result<UserProfile, Error>;
}
