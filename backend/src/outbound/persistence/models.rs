//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; adapters convert them to
//! domain entities before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    EmailAddress, Organization, OrganizationChanges, OrganizationId, PasswordHash, TestEntity,
    TestEntityId, TestEntityStatus, User, UserChanges, UserId,
};

use super::schema::{organizations, test_entities, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password: String,
    pub thumb: Option<String>,
    pub organization_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            email: EmailAddress::from_trusted(row.email),
            name: row.name,
            password: PasswordHash::new(row.password),
            thumb: row.thumb,
            organization_id: row.organization_id.map(OrganizationId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub password: &'a str,
    pub thumb: Option<&'a str>,
    pub organization_id: Option<Uuid>,
}

/// Partial user update; `None` fields are left out of the `SET` clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub thumb: Option<Option<&'a str>>,
    pub organization_id: Option<Option<Uuid>>,
}

impl<'a> From<&'a UserChanges> for UserChangeset<'a> {
    fn from(changes: &'a UserChanges) -> Self {
        Self {
            name: changes.name.as_deref(),
            thumb: changes.thumb.as_ref().map(Option::as_deref),
            organization_id: changes
                .organization_id
                .map(|value| value.map(|id| *id.as_uuid())),
        }
    }
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

/// Row read from `organizations`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
    pub document: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Self {
            id: OrganizationId::from_uuid(row.id),
            name: row.name,
            document: row.document,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable organization.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = organizations)]
pub(crate) struct NewOrganizationRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub document: Option<&'a str>,
}

/// Partial organization update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = organizations)]
pub(crate) struct OrganizationChangeset<'a> {
    pub name: Option<&'a str>,
    pub document: Option<Option<&'a str>>,
}

impl<'a> From<&'a OrganizationChanges> for OrganizationChangeset<'a> {
    fn from(changes: &'a OrganizationChanges) -> Self {
        Self {
            name: changes.name.as_deref(),
            document: changes.document.as_ref().map(Option::as_deref),
        }
    }
}

// ---------------------------------------------------------------------------
// Test entities
// ---------------------------------------------------------------------------

/// Row read from `test_entities`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = test_entities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TestEntityRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<TestEntityRow> for TestEntity {
    fn from(row: TestEntityRow) -> Self {
        let status = row.status.parse().unwrap_or_else(|_| {
            warn!(
                value = row.status.as_str(),
                test_entity_id = %row.id,
                "unrecognised test entity status, defaulting to active"
            );
            TestEntityStatus::Active
        });
        Self {
            id: TestEntityId::from_uuid(row.id),
            name: row.name,
            status,
            created_at: row.created_at,
        }
    }
}

/// Insertable test entity.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = test_entities)]
pub(crate) struct NewTestEntityRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub status: &'a str,
}
