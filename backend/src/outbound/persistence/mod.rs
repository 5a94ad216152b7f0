//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository adapters translate between Diesel row structs and domain
//! entities and contain no business rules. Row models (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use stockflow::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), stockflow::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/stockflow")).await?;
//! let users = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_database_probe;
mod diesel_error_mapping;
mod diesel_organization_repository;
mod diesel_schema_migrator;
mod diesel_test_entity_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_database_probe::DieselDatabaseProbe;
pub use diesel_organization_repository::DieselOrganizationRepository;
pub use diesel_schema_migrator::{DieselSchemaMigrator, MIGRATIONS, run_pending_migrations};
pub use diesel_test_entity_repository::DieselTestEntityRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
