//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`DatabaseProbe`],
//! [`SchemaMigrator`]) are implemented by outbound adapters. Driving ports
//! (`*Command`, `*Query`, [`SchemaMaintenance`]) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod database_probe;
mod health_query;
mod organization_repository;
mod organizations_command;
mod organizations_query;
mod password_hasher;
mod schema_maintenance;
mod schema_migrator;
mod test_entities_command;
mod test_entity_repository;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use database_probe::MockDatabaseProbe;
pub use database_probe::{DatabaseProbe, DatabaseProbeError};
#[cfg(test)]
pub use health_query::MockHealthQuery;
pub use health_query::{DatabaseHealth, HealthQuery, HealthReport};
#[cfg(test)]
pub use organization_repository::MockOrganizationRepository;
pub use organization_repository::{OrganizationRepository, OrganizationRepositoryError};
#[cfg(test)]
pub use organizations_command::MockOrganizationsCommand;
pub use organizations_command::{
    CreateOrganizationRequest, OrganizationsCommand, UpdateOrganizationRequest,
};
#[cfg(test)]
pub use organizations_query::MockOrganizationsQuery;
pub use organizations_query::OrganizationsQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use schema_maintenance::MockSchemaMaintenance;
pub use schema_maintenance::{MigrationRun, SchemaMaintenance};
#[cfg(test)]
pub use schema_migrator::MockSchemaMigrator;
pub use schema_migrator::{
    APPLICATION_TABLES, AppliedMigration, RECENT_MIGRATIONS_LIMIT, SchemaMigrator,
    SchemaMigratorError, SchemaStatus,
};
#[cfg(test)]
pub use test_entities_command::{MockTestEntitiesCommand, MockTestEntitiesQuery};
pub use test_entities_command::{CreateTestEntityRequest, TestEntitiesCommand, TestEntitiesQuery};
#[cfg(test)]
pub use test_entity_repository::MockTestEntityRepository;
pub use test_entity_repository::{TestEntityRepository, TestEntityRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{RegisterUserRequest, UpdateUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
