//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// The hashing primitive failed.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Turns a plaintext [`Password`] into a storable [`PasswordHash`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash the password. Implementations must not block the async runtime.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;
}
