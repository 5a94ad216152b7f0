//! Tests for the generated OpenAPI document.
//!
//! These check that the document references the schema wrappers from
//! `inbound::http::schemas` and advertises every public route.

use rstest::{fixture, rstest};
use stockflow::ApiDoc;
use utoipa::OpenApi;
use utoipa::openapi::RefOr;
use utoipa::openapi::schema::Schema;

// Note: utoipa replaces :: with . in schema names
const ERROR_CODE_SCHEMA_NAME: &str = "crate.domain.ErrorCode";
const ORGANIZATION_SCHEMA_NAME: &str = "crate.domain.Organization";
const TEST_ENTITY_SCHEMA_NAME: &str = "crate.domain.TestEntity";

#[fixture]
fn document() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[rstest]
#[case("/api/users")]
#[case("/api/users/{id}")]
#[case("/api/auth/register")]
#[case("/api/organizations")]
#[case("/api/organizations/{id}")]
#[case("/api/test-entity")]
#[case("/api/test-entity/{id}")]
#[case("/api/health")]
#[case("/api/migrate")]
#[case("/health/ready")]
#[case("/health/live")]
fn route_is_documented(document: utoipa::openapi::OpenApi, #[case] path: &str) {
    assert!(document.paths.paths.contains_key(path), "missing {path}");
}

#[rstest]
fn error_codes_use_wire_spelling(document: utoipa::openapi::OpenApi) {
    let json = serde_json::to_value(&document).expect("document serialises");
    let codes = &json["components"]["schemas"][ERROR_CODE_SCHEMA_NAME]["enum"];
    let codes: Vec<&str> = codes
        .as_array()
        .expect("error code enum")
        .iter()
        .filter_map(serde_json::Value::as_str)
        .collect();

    for code in [
        "INVALID_EMAIL_FORMAT",
        "EMAIL_ALREADY_EXISTS",
        "NAME_ALREADY_EXISTS",
        "INVALID_STATUS",
        "INTERNAL_ERROR",
    ] {
        assert!(codes.contains(&code), "missing {code}");
    }
}

#[rstest]
#[case(ORGANIZATION_SCHEMA_NAME, "createdAt")]
#[case(TEST_ENTITY_SCHEMA_NAME, "status")]
fn entity_schemas_use_camel_case_fields(
    document: utoipa::openapi::OpenApi,
    #[case] schema_name: &str,
    #[case] field: &str,
) {
    let components = document.components.expect("components");
    let schema = components.schemas.get(schema_name).expect("schema present");
    match schema {
        RefOr::T(Schema::Object(object)) => {
            assert!(object.properties.contains_key(field), "{schema_name} lacks {field}");
        }
        _ => panic!("expected object schema for {schema_name}"),
    }
}

#[rstest]
fn migrate_requires_bearer_token(document: utoipa::openapi::OpenApi) {
    let components = document.components.expect("components");
    assert!(components.security_schemes.contains_key("MaintenanceToken"));
}
