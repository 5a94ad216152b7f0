//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (users,
//!   organizations, test entities, health, maintenance)
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`UserProfileSchema`]
//!   and friends) that provide OpenAPI definitions without coupling domain
//!   types to the utoipa framework
//! - **Security**: the bearer token guarding `POST /api/migrate`
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, OrganizationSchema, TestEntitySchema, TestEntityStatusSchema,
    UserProfileSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the maintenance token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "MaintenanceToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Token configured via STOCKFLOW_MIGRATION_TOKEN."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "StockFlow backend API",
        description = "User, organization and test entity registration with health and maintenance endpoints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::organizations::create_organization,
        crate::inbound::http::organizations::list_organizations,
        crate::inbound::http::organizations::get_organization,
        crate::inbound::http::organizations::update_organization,
        crate::inbound::http::organizations::delete_organization,
        crate::inbound::http::test_entities::create_test_entity,
        crate::inbound::http::test_entities::list_test_entities,
        crate::inbound::http::test_entities::get_test_entity,
        crate::inbound::http::test_entities::delete_test_entity,
        crate::inbound::http::health::health_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::migrate::run_migrations,
        crate::inbound::http::migrate::migration_status,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserProfileSchema,
        OrganizationSchema,
        TestEntitySchema,
        TestEntityStatusSchema,
    )),
    tags(
        (name = "users", description = "User registration and management"),
        (name = "auth", description = "Authentication scaffolding"),
        (name = "organizations", description = "Organization registration and management"),
        (name = "test-entity", description = "Scaffolding entity exercising the full stack"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "maintenance", description = "Operator schema maintenance")
    )
)]
pub struct ApiDoc;
