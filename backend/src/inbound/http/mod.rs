//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod migrate;
pub mod organizations;
pub mod schemas;
pub mod state;
pub mod test_entities;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Every JSON endpoint, mounted under `/api`.
///
/// Handlers expect [`state::HttpState`] in application data. The scope
/// installs the shared JSON extractor configuration so malformed bodies
/// produce the standard error envelope.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(validation::json_config())
        .service(users::create_user)
        .service(users::register_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(organizations::create_organization)
        .service(organizations::list_organizations)
        .service(organizations::get_organization)
        .service(organizations::update_organization)
        .service(organizations::delete_organization)
        .service(test_entities::create_test_entity)
        .service(test_entities::list_test_entities)
        .service(test_entities::get_test_entity)
        .service(test_entities::delete_test_entity)
        .service(health::health_report)
        .service(migrate::run_migrations)
        .service(migrate::migration_status)
}
