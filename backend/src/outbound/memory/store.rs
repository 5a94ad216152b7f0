//! Mutex-guarded state shared by the in-memory port implementations.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    APPLICATION_TABLES, DatabaseProbe, DatabaseProbeError, OrganizationRepository,
    OrganizationRepositoryError, SchemaMigrator, SchemaMigratorError, SchemaStatus,
    TestEntityRepository, TestEntityRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    EmailAddress, NewOrganization, NewTestEntity, NewUser, Organization, OrganizationChanges,
    OrganizationId, TestEntity, TestEntityId, User, UserChanges, UserId,
};

/// Rows in insertion order; listing walks them newest first.
#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    organizations: Vec<Organization>,
    test_entities: Vec<TestEntity>,
}

impl State {
    fn organization_exists(&self, id: &OrganizationId) -> bool {
        self.organizations.iter().any(|org| &org.id == id)
    }

    fn organization_conflict(
        &self,
        name: Option<&str>,
        document: Option<&str>,
        exclude: Option<&OrganizationId>,
    ) -> Option<&'static str> {
        let others = || {
            self.organizations
                .iter()
                .filter(move |org| exclude != Some(&org.id))
        };
        if name.is_some_and(|name| others().any(|org| org.name == name)) {
            return Some("name");
        }
        if document.is_some_and(|document| {
            others().any(|org| org.document.as_deref() == Some(document))
        }) {
            return Some("document");
        }
        None
    }
}

/// Shared in-memory store. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| String::from("in-memory store lock poisoned"))
    }
}

fn newest_first<T: Clone>(rows: &[T]) -> Vec<T> {
    rows.iter().rev().cloned().collect()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(newest_first(&state.users))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.users.iter().find(|user| &user.id == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.users.iter().find(|user| &user.email == email).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        if state.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserRepositoryError::unique_violation("email"));
        }
        let dangling = user
            .organization_id
            .is_some_and(|org| !state.organization_exists(&org));
        if dangling {
            return Err(UserRepositoryError::query("organization reference is dangling"));
        }

        let now = Utc::now();
        let stored = User {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            password: user.password.clone(),
            thumb: user.thumb.clone(),
            organization_id: user.organization_id,
            created_at: now,
            updated_at: now,
        };
        state.users.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        if let Some(Some(org)) = &changes.organization_id {
            if !state.organization_exists(org) {
                return Ok(None);
            }
        }
        let Some(user) = state.users.iter_mut().find(|user| &user.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            user.name = Some(name.clone());
        }
        if let Some(thumb) = &changes.thumb {
            user.thumb.clone_from(thumb);
        }
        if let Some(org) = changes.organization_id {
            user.organization_id = org;
        }
        if !changes.is_empty() {
            user.updated_at = Utc::now();
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        let before = state.users.len();
        state.users.retain(|user| &user.id != id);
        Ok(state.users.len() != before)
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        let state = self.lock().map_err(OrganizationRepositoryError::query)?;
        Ok(newest_first(&state.organizations))
    }

    async fn find_by_id(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let state = self.lock().map_err(OrganizationRepositoryError::query)?;
        Ok(state.organizations.iter().find(|org| &org.id == id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let state = self.lock().map_err(OrganizationRepositoryError::query)?;
        Ok(state.organizations.iter().find(|org| org.name == name).cloned())
    }

    async fn find_by_document(
        &self,
        document: &str,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let state = self.lock().map_err(OrganizationRepositoryError::query)?;
        Ok(state
            .organizations
            .iter()
            .find(|org| org.document.as_deref() == Some(document))
            .cloned())
    }

    async fn create(
        &self,
        organization: &NewOrganization,
    ) -> Result<Organization, OrganizationRepositoryError> {
        let mut state = self.lock().map_err(OrganizationRepositoryError::query)?;
        if let Some(field) = state.organization_conflict(
            Some(&organization.name),
            organization.document.as_deref(),
            None,
        ) {
            return Err(OrganizationRepositoryError::unique_violation(field));
        }

        let now = Utc::now();
        let stored = Organization {
            id: organization.id,
            name: organization.name.clone(),
            document: organization.document.clone(),
            created_at: now,
            updated_at: now,
        };
        state.organizations.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &OrganizationId,
        changes: &OrganizationChanges,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let mut state = self.lock().map_err(OrganizationRepositoryError::query)?;
        let conflict = state.organization_conflict(
            changes.name.as_deref(),
            changes.document.as_ref().and_then(Option::as_deref),
            Some(id),
        );
        if conflict.is_some() {
            return Ok(None);
        }
        let Some(org) = state.organizations.iter_mut().find(|org| &org.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            org.name.clone_from(name);
        }
        if let Some(document) = &changes.document {
            org.document.clone_from(document);
        }
        if !changes.is_empty() {
            org.updated_at = Utc::now();
        }
        Ok(Some(org.clone()))
    }

    async fn delete(&self, id: &OrganizationId) -> Result<bool, OrganizationRepositoryError> {
        let mut state = self.lock().map_err(OrganizationRepositoryError::query)?;
        let before = state.organizations.len();
        state.organizations.retain(|org| &org.id != id);
        if state.organizations.len() == before {
            return Ok(false);
        }

        let now = Utc::now();
        for user in state
            .users
            .iter_mut()
            .filter(|user| user.organization_id.as_ref() == Some(id))
        {
            user.organization_id = None;
            user.updated_at = now;
        }
        Ok(true)
    }
}

#[async_trait]
impl TestEntityRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<TestEntity>, TestEntityRepositoryError> {
        let state = self.lock().map_err(TestEntityRepositoryError::query)?;
        Ok(newest_first(&state.test_entities))
    }

    async fn find_by_id(
        &self,
        id: &TestEntityId,
    ) -> Result<Option<TestEntity>, TestEntityRepositoryError> {
        let state = self.lock().map_err(TestEntityRepositoryError::query)?;
        Ok(state
            .test_entities
            .iter()
            .find(|entity| &entity.id == id)
            .cloned())
    }

    async fn create(&self, entity: &NewTestEntity) -> Result<TestEntity, TestEntityRepositoryError> {
        let mut state = self.lock().map_err(TestEntityRepositoryError::query)?;
        let stored = TestEntity {
            id: entity.id,
            name: entity.name.clone(),
            status: entity.status,
            created_at: Utc::now(),
        };
        state.test_entities.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: &TestEntityId) -> Result<bool, TestEntityRepositoryError> {
        let mut state = self.lock().map_err(TestEntityRepositoryError::query)?;
        let before = state.test_entities.len();
        state.test_entities.retain(|entity| &entity.id != id);
        Ok(state.test_entities.len() != before)
    }
}

#[async_trait]
impl DatabaseProbe for InMemoryStore {
    async fn ping(&self) -> Result<(), DatabaseProbeError> {
        self.lock()
            .map(|_| ())
            .map_err(DatabaseProbeError::connection)
    }
}

#[async_trait]
impl SchemaMigrator for InMemoryStore {
    /// The in-memory schema is always current.
    async fn apply_pending(&self) -> Result<Vec<String>, SchemaMigratorError> {
        Ok(Vec::new())
    }

    async fn status(&self) -> Result<SchemaStatus, SchemaMigratorError> {
        Ok(SchemaStatus {
            tables: APPLICATION_TABLES
                .iter()
                .map(|table| ((*table).to_owned(), true))
                .collect::<BTreeMap<_, _>>(),
            applied_count: 0,
            recent: Vec::new(),
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
