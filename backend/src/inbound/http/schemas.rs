//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body or a path parameter is malformed.
    #[schema(rename = "INVALID_REQUEST")]
    InvalidRequest,
    /// A required name is missing or blank.
    #[schema(rename = "INVALID_NAME")]
    InvalidName,
    /// A name falls outside the permitted length range.
    #[schema(rename = "INVALID_NAME_LENGTH")]
    InvalidNameLength,
    /// The email is missing or blank.
    #[schema(rename = "INVALID_EMAIL")]
    InvalidEmail,
    /// The email does not look like an address.
    #[schema(rename = "INVALID_EMAIL_FORMAT")]
    InvalidEmailFormat,
    /// The password is missing or blank.
    #[schema(rename = "INVALID_PASSWORD")]
    InvalidPassword,
    /// The password is too short.
    #[schema(rename = "INVALID_PASSWORD_LENGTH")]
    InvalidPasswordLength,
    /// The thumbnail is not an absolute URL.
    #[schema(rename = "INVALID_THUMB")]
    InvalidThumb,
    /// The organization reference is not a UUID.
    #[schema(rename = "INVALID_ORGANIZATION_ID")]
    InvalidOrganizationId,
    /// The organization reference names no organization.
    #[schema(rename = "UNKNOWN_ORGANIZATION")]
    UnknownOrganization,
    /// The status is not one of the accepted values.
    #[schema(rename = "INVALID_STATUS")]
    InvalidStatus,
    /// Another user already uses the email.
    #[schema(rename = "EMAIL_ALREADY_EXISTS")]
    EmailAlreadyExists,
    /// Another organization already uses the name.
    #[schema(rename = "NAME_ALREADY_EXISTS")]
    NameAlreadyExists,
    /// Another organization already uses the document.
    #[schema(rename = "DOCUMENT_ALREADY_EXISTS")]
    DocumentAlreadyExists,
    /// Authentication failed or is missing.
    #[schema(rename = "UNAUTHORIZED")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "FORBIDDEN")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "NOT_FOUND")]
    NotFound,
    /// The database is unavailable.
    #[schema(rename = "SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "INTERNAL_ERROR")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "User with this email already exists")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "EMAIL_ALREADY_EXISTS")]
    code: ErrorCodeSchema,
    /// Supplementary error details, such as the offending field.
    details: Option<serde_json::Value>,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::UserProfile`].
///
/// Registered user as returned to clients. The password hash is never part
/// of this shape.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserProfile)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserProfileSchema {
    /// Stable user identifier.
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Lower-cased email address.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Optional display name.
    #[schema(example = "Ada Lovelace")]
    name: Option<String>,
    /// Optional thumbnail URL.
    #[schema(example = "https://cdn.example.com/ada.png")]
    thumb: Option<String>,
    /// Organization the user belongs to, if any.
    #[schema(value_type = Option<String>, format = Uuid)]
    organization_id: Option<String>,
    /// Creation timestamp.
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    /// Last update timestamp.
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Organization`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Organization)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrganizationSchema {
    /// Stable organization identifier.
    #[schema(value_type = String, format = Uuid)]
    id: String,
    /// Unique organization name.
    #[schema(example = "Acme Ltda")]
    name: String,
    /// Optional unique registration document.
    #[schema(example = "12.345.678/0001-90")]
    document: Option<String>,
    /// Creation timestamp.
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    /// Last update timestamp.
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::TestEntityStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TestEntityStatus)]
pub enum TestEntityStatusSchema {
    /// Default status.
    #[schema(rename = "active")]
    Active,
    #[schema(rename = "inactive")]
    Inactive,
    #[schema(rename = "pending")]
    Pending,
}

/// OpenAPI schema for [`crate::domain::TestEntity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TestEntity)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TestEntitySchema {
    /// Stable entity identifier.
    #[schema(value_type = String, format = Uuid)]
    id: String,
    /// Entity name.
    #[schema(example = "Sample")]
    name: String,
    /// Lifecycle status.
    status: TestEntityStatusSchema,
    /// Creation timestamp.
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("\"error\""), "missing error field");
        assert!(schema_json.contains("traceId"), "missing traceId field");
    }

    #[test]
    fn error_code_schema_lists_conflict_codes() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "EMAIL_ALREADY_EXISTS",
            "NAME_ALREADY_EXISTS",
            "DOCUMENT_ALREADY_EXISTS",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn user_profile_schema_has_no_password() {
        let schema_json = schema_to_json::<UserProfileSchema>();
        assert_eq!(UserProfileSchema::name(), "crate.domain.UserProfile");
        assert!(schema_json.contains("organizationId"));
        assert!(!schema_json.contains("password"));
    }

    #[test]
    fn test_entity_schema_lists_statuses() {
        let schema_json = schema_to_json::<TestEntitySchema>();
        assert!(schema_json.contains("createdAt"));
        let status_json = schema_to_json::<TestEntityStatusSchema>();
        for status in ["active", "inactive", "pending"] {
            assert!(status_json.contains(status), "missing {status}");
        }
    }
}
