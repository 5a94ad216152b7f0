//! User data model and its input value objects.
//!
//! Values arriving from adapters are untrusted strings. The constructors here
//! normalise them (trimming, lower-casing) and reject anything the store must
//! never contain. Each rejection carries the [`ErrorCode`] clients see.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use zeroize::Zeroizing;

use super::{Error, ErrorCode, OrganizationId, UserId};

/// Minimum length, in characters, of a user display name.
pub const USER_NAME_MIN: usize = 2;
/// Maximum length, in characters, of a user display name.
pub const USER_NAME_MAX: usize = 255;
/// Minimum length, in characters, of a plaintext password.
pub const PASSWORD_MIN: usize = 6;

/// Validation errors raised while building user inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("Name is required and cannot be empty")]
    EmptyName,
    #[error("Name must be between {min} and {max} characters")]
    NameLength { min: usize, max: usize },
    #[error("Email is required and cannot be empty")]
    EmptyEmail,
    #[error("Invalid email format")]
    EmailFormat,
    #[error("Password is required and cannot be empty")]
    EmptyPassword,
    #[error("Password must be at least {min} characters long")]
    PasswordLength { min: usize },
    #[error("Thumb must be an absolute URL")]
    Thumb,
    #[error("Organization id must be a valid UUID")]
    OrganizationId,
}

impl UserValidationError {
    /// Machine-readable code reported to clients.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyName => ErrorCode::InvalidName,
            Self::NameLength { .. } => ErrorCode::InvalidNameLength,
            Self::EmptyEmail => ErrorCode::InvalidEmail,
            Self::EmailFormat => ErrorCode::InvalidEmailFormat,
            Self::EmptyPassword => ErrorCode::InvalidPassword,
            Self::PasswordLength { .. } => ErrorCode::InvalidPasswordLength,
            Self::Thumb => ErrorCode::InvalidThumb,
            Self::OrganizationId => ErrorCode::InvalidOrganizationId,
        }
    }

    /// Input field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameLength { .. } => "name",
            Self::EmptyEmail | Self::EmailFormat => "email",
            Self::EmptyPassword | Self::PasswordLength { .. } => "password",
            Self::Thumb => "thumb",
            Self::OrganizationId => "organizationId",
        }
    }
}

impl From<UserValidationError> for Error {
    fn from(value: UserValidationError) -> Self {
        Self::validation(value.code(), value.field(), value.to_string())
    }
}

/// Trim and length-check an optional display name.
///
/// # Errors
/// Returns [`UserValidationError::EmptyName`] for blank input and
/// [`UserValidationError::NameLength`] outside
/// [`USER_NAME_MIN`]..=[`USER_NAME_MAX`].
pub fn normalise_user_name(raw: &str) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyName);
    }
    let length = trimmed.chars().count();
    if !(USER_NAME_MIN..=USER_NAME_MAX).contains(&length) {
        return Err(UserValidationError::NameLength {
            min: USER_NAME_MIN,
            max: USER_NAME_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

/// Check that a thumbnail reference is an absolute URL.
///
/// # Errors
/// Returns [`UserValidationError::Thumb`] when the value does not parse.
pub fn normalise_thumb(raw: &str) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    url::Url::parse(trimmed).map_err(|_| UserValidationError::Thumb)?;
    Ok(trimmed.to_owned())
}

/// Parse an organization reference supplied as text.
///
/// # Errors
/// Returns [`UserValidationError::OrganizationId`] for non-UUID input.
pub fn parse_organization_ref(raw: &str) -> Result<OrganizationId, UserValidationError> {
    OrganizationId::parse(raw).map_err(|_| UserValidationError::OrganizationId)
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address: trimmed, lower-cased, shaped like `a@b.c`.
///
/// # Examples
/// ```
/// use stockflow::domain::EmailAddress;
///
/// let email = EmailAddress::parse("  Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate raw input.
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyEmail`] for blank input and
    /// [`UserValidationError::EmailFormat`] when the pattern does not match.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let normalised = raw.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::EmailFormat);
        }
        Ok(Self(normalised))
    }

    /// Rebuild an address read back from trusted storage.
    #[must_use]
    pub fn from_trusted(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext password held only for the duration of a registration.
///
/// The buffer is wiped on drop and never printed.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate presence and minimum length.
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyPassword`] or
    /// [`UserValidationError::PasswordLength`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = Zeroizing::new(raw.into());
        if raw.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        if raw.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordLength { min: PASSWORD_MIN });
        }
        Ok(Self(raw))
    }

    /// Borrow the plaintext for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// One-way password hash as stored by the repository.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Stored user record, password hash included.
///
/// This type deliberately has no `Serialize` implementation; use
/// [`UserProfile`] for anything leaving the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: Option<String>,
    pub password: PasswordHash,
    pub thumb: Option<String>,
    pub organization_id: Option<OrganizationId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-visible projection of a [`User`] without the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: Option<String>,
    pub thumb: Option<String>,
    pub organization_id: Option<OrganizationId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            name,
            password: _,
            thumb,
            organization_id,
            created_at,
            updated_at,
        } = user;
        Self {
            id,
            email,
            name,
            thumb,
            organization_id,
            created_at,
            updated_at,
        }
    }
}

/// Validated insert payload handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: Option<String>,
    pub password: PasswordHash,
    pub thumb: Option<String>,
    pub organization_id: Option<OrganizationId>,
}

/// Partial update: `None` leaves a column untouched.
///
/// The nested options on `thumb` and `organization_id` distinguish "leave
/// alone" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub thumb: Option<Option<String>>,
    pub organization_id: Option<Option<OrganizationId>>,
}

impl UserChanges {
    /// Whether the update touches no column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.thumb.is_none() && self.organization_id.is_none()
    }
}
