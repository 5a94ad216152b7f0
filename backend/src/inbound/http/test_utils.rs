//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::{
    HealthService, MaintenanceService, OrganizationsService, TestEntitiesService, UsersService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::security::BcryptPasswordHasher;

/// Token accepted by the maintenance endpoint in handler tests.
pub const TEST_MIGRATION_TOKEN: &str = "test-migration-token";

/// Build handler state over a fresh in-memory store.
///
/// - Uses the minimum bcrypt cost so registration tests stay fast.
/// - Configures [`TEST_MIGRATION_TOKEN`] as the maintenance token.
pub fn memory_state() -> (HttpState, InMemoryStore) {
    let store = Arc::new(InMemoryStore::new());
    let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
    let users = Arc::new(UsersService::new(store.clone(), store.clone(), hasher));
    let organizations = Arc::new(OrganizationsService::new(store.clone()));
    let test_entities = Arc::new(TestEntitiesService::new(store.clone()));

    let state = HttpState {
        users: users.clone(),
        users_query: users,
        organizations: organizations.clone(),
        organizations_query: organizations,
        test_entities: test_entities.clone(),
        test_entities_query: test_entities,
        health: Arc::new(HealthService::new(store.clone(), "test")),
        maintenance: Arc::new(MaintenanceService::new(
            store.clone(),
            Some(TEST_MIGRATION_TOKEN.to_owned()),
        )),
    };
    (state, (*store).clone())
}
