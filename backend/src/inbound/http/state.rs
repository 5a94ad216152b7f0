//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    HealthQuery, OrganizationsCommand, OrganizationsQuery, SchemaMaintenance, TestEntitiesCommand,
    TestEntitiesQuery, UsersCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub organizations: Arc<dyn OrganizationsCommand>,
    pub organizations_query: Arc<dyn OrganizationsQuery>,
    pub test_entities: Arc<dyn TestEntitiesCommand>,
    pub test_entities_query: Arc<dyn TestEntitiesQuery>,
    pub health: Arc<dyn HealthQuery>,
    pub maintenance: Arc<dyn SchemaMaintenance>,
}
