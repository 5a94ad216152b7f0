//! User registration and management use cases.
//!
//! Validation runs in a fixed order (name, email, password, thumb,
//! organization) so clients always see the first failing field. The email
//! uniqueness lookup is a courtesy check; the store's unique constraint is
//! authoritative and reported with the same error.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    OrganizationRepository, OrganizationRepositoryError, PasswordHasher, PasswordHasherError,
    RegisterUserRequest, UpdateUserRequest, UserRepository, UserRepositoryError, UsersCommand,
    UsersQuery,
};
use crate::domain::user::{normalise_thumb, normalise_user_name, parse_organization_ref};
use crate::domain::{
    EmailAddress, Error, ErrorCode, NewUser, OrganizationId, Password, UserChanges, UserId,
    UserProfile, UserValidationError,
};

fn email_taken() -> Error {
    Error::new(
        ErrorCode::EmailAlreadyExists,
        "User with this email already exists",
    )
    .with_details(json!({ "field": "email" }))
}

fn unknown_organization() -> Error {
    Error::validation(
        ErrorCode::UnknownOrganization,
        "organizationId",
        "Organization does not exist",
    )
}

fn user_not_found() -> Error {
    Error::not_found("User not found")
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::UniqueViolation { field } if field == "email" => email_taken(),
        UserRepositoryError::UniqueViolation { field } => {
            Error::internal(format!("unexpected user uniqueness conflict on {field}"))
        }
    }
}

fn map_organization_error(error: OrganizationRepositoryError) -> Error {
    match error {
        OrganizationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("organization repository unavailable: {message}"))
        }
        OrganizationRepositoryError::Query { message }
        | OrganizationRepositoryError::UniqueViolation { field: message } => {
            Error::internal(format!("organization repository error: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Blank thumbnails are treated as absent.
fn optional_thumb(raw: Option<&str>) -> Result<Option<String>, UserValidationError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(normalise_thumb)
        .transpose()
}

/// Blank organization references are treated as absent.
fn optional_organization(raw: Option<&str>) -> Result<Option<OrganizationId>, UserValidationError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(parse_organization_ref)
        .transpose()
}

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UsersService<U, O, H> {
    users: Arc<U>,
    organizations: Arc<O>,
    hasher: Arc<H>,
}

impl<U, O, H> UsersService<U, O, H> {
    /// Create a service over the given repositories and hasher.
    pub fn new(users: Arc<U>, organizations: Arc<O>, hasher: Arc<H>) -> Self {
        Self {
            users,
            organizations,
            hasher,
        }
    }
}

impl<U, O, H> UsersService<U, O, H>
where
    U: UserRepository,
    O: OrganizationRepository,
    H: PasswordHasher,
{
    async fn ensure_organization_exists(&self, id: &OrganizationId) -> Result<(), Error> {
        let found = self
            .organizations
            .find_by_id(id)
            .await
            .map_err(map_organization_error)?;
        match found {
            Some(_) => Ok(()),
            None => Err(unknown_organization()),
        }
    }

    async fn find_existing(&self, id: &UserId) -> Result<UserProfile, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(UserProfile::from)
            .ok_or_else(user_not_found)
    }
}

#[async_trait]
impl<U, O, H> UsersCommand for UsersService<U, O, H>
where
    U: UserRepository,
    O: OrganizationRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error> {
        let RegisterUserRequest {
            email,
            password,
            name,
            organization_id,
            thumb,
        } = request;

        let name = name.as_deref().map(normalise_user_name).transpose()?;
        let email = EmailAddress::parse(email.as_deref().unwrap_or_default())?;
        let password = Password::new(password.unwrap_or_default())?;
        let thumb = optional_thumb(thumb.as_deref())?;
        let organization_id = optional_organization(organization_id.as_deref())?;

        if let Some(id) = &organization_id {
            self.ensure_organization_exists(id).await?;
        }

        let existing = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            warn!("registration rejected: email already in use");
            return Err(email_taken());
        }

        let password = self
            .hasher
            .hash(&password)
            .await
            .map_err(map_hasher_error)?;

        let new_user = NewUser {
            id: UserId::random(),
            email,
            name,
            password,
            thumb,
            organization_id,
        };
        let user = self
            .users
            .create(&new_user)
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id, "user registered");
        Ok(user.into())
    }

    async fn update(&self, request: UpdateUserRequest) -> Result<UserProfile, Error> {
        let UpdateUserRequest {
            id,
            name,
            thumb,
            organization_id,
        } = request;

        let changes = UserChanges {
            name: name.as_deref().map(normalise_user_name).transpose()?,
            thumb: thumb
                .map(|value| optional_thumb(value.as_deref()))
                .transpose()?,
            organization_id: organization_id
                .map(|value| optional_organization(value.as_deref()))
                .transpose()?,
        };

        if let Some(Some(org)) = &changes.organization_id {
            self.ensure_organization_exists(org).await?;
        }
        if changes.is_empty() {
            return self.find_existing(&id).await;
        }

        let updated = self
            .users
            .update(&id, &changes)
            .await
            .map_err(map_user_error)?;
        match updated {
            Some(user) => {
                info!(user_id = %user.id, "user updated");
                Ok(user.into())
            }
            // The row exists, so the store refused the organization reference
            // (deleted between the check and the write).
            None => match self.find_existing(&id).await {
                Ok(_) => Err(unknown_organization()),
                Err(error) => Err(error),
            },
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), Error> {
        let removed = self.users.delete(id).await.map_err(map_user_error)?;
        if removed {
            info!(user_id = %id, "user deleted");
            Ok(())
        } else {
            Err(user_not_found())
        }
    }
}

#[async_trait]
impl<U, O, H> UsersQuery for UsersService<U, O, H>
where
    U: UserRepository,
    O: OrganizationRepository,
    H: PasswordHasher,
{
    async fn list(&self) -> Result<Vec<UserProfile>, Error> {
        let users = self.users.find_all().await.map_err(map_user_error)?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    async fn get(&self, id: &UserId) -> Result<UserProfile, Error> {
        self.find_existing(id).await
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
