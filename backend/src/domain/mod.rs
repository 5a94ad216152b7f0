//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: define strongly typed domain entities and the services that
//! enforce business rules before anything reaches a repository.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] / [`ErrorKind`]: the single tagged failure type.
//! - Entities: [`User`], [`UserProfile`], [`Organization`], [`TestEntity`].
//! - Services: [`UsersService`], [`OrganizationsService`],
//!   [`TestEntitiesService`], [`HealthService`], [`MaintenanceService`].
//! - [`TraceId`]: request correlation identifier.

pub mod error;
mod health_service;
mod ids;
mod maintenance_service;
pub mod organization;
mod organizations_service;
pub mod ports;
pub mod test_entity;
mod test_entities_service;
pub mod trace_id;
pub mod user;
mod users_service;

pub use self::error::{Error, ErrorCode, ErrorKind, ErrorValidationError, TRACE_ID_HEADER};
pub use self::health_service::HealthService;
pub use self::ids::{OrganizationId, TestEntityId, UserId};
pub use self::maintenance_service::MaintenanceService;
pub use self::organization::{
    NewOrganization, Organization, OrganizationChanges, OrganizationValidationError,
};
pub use self::organizations_service::OrganizationsService;
pub use self::test_entities_service::TestEntitiesService;
pub use self::test_entity::{NewTestEntity, TestEntity, TestEntityStatus, TestEntityValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, NewUser, Password, PasswordHash, User, UserChanges, UserProfile,
    UserValidationError,
};
pub use self::users_service::UsersService;
