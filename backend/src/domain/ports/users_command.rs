//! Driving port for user registration and mutation.
//!
//! Request fields arrive exactly as the client sent them. The use case owns
//! every validation rule, so absent and blank inputs are both representable.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

/// Raw registration input shared by every registration route.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegisterUserRequest {
    /// Email as typed by the user.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional organization identifier as text.
    pub organization_id: Option<String>,
    /// Optional thumbnail URL.
    pub thumb: Option<String>,
}

impl fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("name", &self.name)
            .field("organization_id", &self.organization_id)
            .field("thumb", &self.thumb)
            .finish()
    }
}

/// Partial user update. `None` leaves a field untouched; `Some(None)` clears
/// a nullable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    /// User being updated.
    pub id: UserId,
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement or cleared thumbnail.
    pub thumb: Option<Option<String>>,
    /// Replacement or cleared organization identifier as text.
    pub organization_id: Option<Option<String>>,
}

/// Use cases that create or change users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate, hash and store a new user.
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error>;

    /// Apply a partial update to an existing user.
    async fn update(&self, request: UpdateUserRequest) -> Result<UserProfile, Error>;

    /// Remove a user.
    async fn delete(&self, id: &UserId) -> Result<(), Error>;
}
