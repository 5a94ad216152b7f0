//! Builders wiring domain services to the configured adapters.

use std::sync::Arc;

use stockflow::domain::ports::{DatabaseProbe, OrganizationRepository, SchemaMigrator};
use stockflow::domain::ports::{PasswordHasher, TestEntityRepository, UserRepository};
use stockflow::domain::{
    HealthService, MaintenanceService, OrganizationsService, TestEntitiesService, UsersService,
};
use stockflow::inbound::http::state::HttpState;
use stockflow::outbound::memory::InMemoryStore;
use stockflow::outbound::persistence::{
    DbPool, DieselDatabaseProbe, DieselOrganizationRepository, DieselSchemaMigrator,
    DieselTestEntityRepository, DieselUserRepository,
};
use stockflow::outbound::security::BcryptPasswordHasher;

use super::ServerConfig;

/// Version reported by `GET /api/health`.
const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Adapters backing each driven port.
struct Adapters<U, O, T, P, M> {
    users: Arc<U>,
    organizations: Arc<O>,
    test_entities: Arc<T>,
    probe: Arc<P>,
    migrator: Arc<M>,
}

impl<U, O, T, P, M> Adapters<U, O, T, P, M>
where
    U: UserRepository + 'static,
    O: OrganizationRepository + 'static,
    T: TestEntityRepository + 'static,
    P: DatabaseProbe + 'static,
    M: SchemaMigrator + 'static,
{
    fn into_state<H>(self, hasher: Arc<H>, migration_token: Option<String>) -> HttpState
    where
        H: PasswordHasher + 'static,
    {
        let users = Arc::new(UsersService::new(
            self.users,
            self.organizations.clone(),
            hasher,
        ));
        let organizations = Arc::new(OrganizationsService::new(self.organizations));
        let test_entities = Arc::new(TestEntitiesService::new(self.test_entities));

        HttpState {
            users: users.clone(),
            users_query: users,
            organizations: organizations.clone(),
            organizations_query: organizations,
            test_entities: test_entities.clone(),
            test_entities_query: test_entities,
            health: Arc::new(HealthService::new(self.probe, SERVICE_VERSION)),
            maintenance: Arc::new(MaintenanceService::new(self.migrator, migration_token)),
        }
    }
}

fn diesel_adapters(
    pool: &DbPool,
) -> Adapters<
    DieselUserRepository,
    DieselOrganizationRepository,
    DieselTestEntityRepository,
    DieselDatabaseProbe,
    DieselSchemaMigrator,
> {
    Adapters {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        organizations: Arc::new(DieselOrganizationRepository::new(pool.clone())),
        test_entities: Arc::new(DieselTestEntityRepository::new(pool.clone())),
        probe: Arc::new(DieselDatabaseProbe::new(pool.clone())),
        migrator: Arc::new(DieselSchemaMigrator::new(pool.database_url())),
    }
}

fn memory_adapters()
-> Adapters<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    Adapters {
        users: store.clone(),
        organizations: store.clone(),
        test_entities: store.clone(),
        probe: store.clone(),
        migrator: store,
    }
}

/// Build the HTTP state from configuration.
///
/// Uses Diesel adapters when a pool is configured, otherwise a single shared
/// in-memory store backs every port.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let hasher = Arc::new(BcryptPasswordHasher::new());
    let token = config.migration_token.clone();
    match &config.db_pool {
        Some(pool) => diesel_adapters(pool).into_state(hasher, token),
        None => memory_adapters().into_state(hasher, token),
    }
}
