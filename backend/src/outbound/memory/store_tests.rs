//! Behavioural coverage for the in-memory store.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::{PasswordHash, TestEntityStatus};

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

fn new_user(email: &str, organization_id: Option<OrganizationId>) -> NewUser {
    NewUser {
        id: UserId::random(),
        email: EmailAddress::parse(email).expect("valid email"),
        name: None,
        password: PasswordHash::new("$2b$10$hash"),
        thumb: None,
        organization_id,
    }
}

fn new_organization(name: &str, document: Option<&str>) -> NewOrganization {
    NewOrganization {
        id: OrganizationId::random(),
        name: name.to_owned(),
        document: document.map(str::to_owned),
    }
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_a_unique_violation(store: InMemoryStore) {
    UserRepository::create(&store, &new_user("ada@example.com", None))
        .await
        .expect("first insert");
    let error = UserRepository::create(&store, &new_user("ada@example.com", None))
        .await
        .expect_err("second insert");

    assert_eq!(error, UserRepositoryError::unique_violation("email"));
    assert_eq!(UserRepository::find_all(&store).await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn listing_is_newest_first(store: InMemoryStore) {
    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        UserRepository::create(&store, &new_user(email, None))
            .await
            .expect("insert");
    }

    let emails: Vec<String> = UserRepository::find_all(&store)
        .await
        .expect("list")
        .into_iter()
        .map(|user| user.email.to_string())
        .collect();
    assert_eq!(emails, ["c@example.com", "b@example.com", "a@example.com"]);
}

#[rstest]
#[tokio::test]
async fn dangling_organization_reference_is_rejected(store: InMemoryStore) {
    let result =
        UserRepository::create(&store, &new_user("a@example.com", Some(OrganizationId::random())))
            .await;
    assert!(matches!(result, Err(UserRepositoryError::Query { .. })));
}

#[rstest]
#[tokio::test]
async fn deleting_organization_detaches_users(store: InMemoryStore) {
    let org = OrganizationRepository::create(&store, &new_organization("Acme", None))
        .await
        .expect("org insert");
    let user = UserRepository::create(&store, &new_user("a@example.com", Some(org.id)))
        .await
        .expect("user insert");

    assert!(OrganizationRepository::delete(&store, &org.id)
        .await
        .expect("delete"));

    let reloaded = UserRepository::find_by_id(&store, &user.id)
        .await
        .expect("lookup")
        .expect("user survives");
    assert!(reloaded.organization_id.is_none());
}

#[rstest]
#[tokio::test]
async fn organization_update_conflict_returns_none(store: InMemoryStore) {
    OrganizationRepository::create(&store, &new_organization("Acme", Some("1")))
        .await
        .expect("first");
    let other = OrganizationRepository::create(&store, &new_organization("Globex", None))
        .await
        .expect("second");

    let changes = OrganizationChanges {
        name: None,
        document: Some(Some("1".to_owned())),
    };
    let result = OrganizationRepository::update(&store, &other.id, &changes)
        .await
        .expect("update call");
    assert!(result.is_none());

    let unchanged = OrganizationRepository::find_by_id(&store, &other.id)
        .await
        .expect("lookup")
        .expect("present");
    assert!(unchanged.document.is_none());
}

#[rstest]
#[tokio::test]
async fn user_update_touches_only_supplied_fields(store: InMemoryStore) {
    let mut insert = new_user("a@example.com", None);
    insert.name = Some("Ada".to_owned());
    insert.thumb = Some("https://cdn.example.com/a.png".to_owned());
    let user = UserRepository::create(&store, &insert).await.expect("insert");

    let changes = UserChanges {
        name: None,
        thumb: Some(None),
        organization_id: None,
    };
    let updated = UserRepository::update(&store, &user.id, &changes)
        .await
        .expect("update")
        .expect("present");

    assert_eq!(updated.name.as_deref(), Some("Ada"));
    assert!(updated.thumb.is_none());
    assert!(updated.updated_at >= user.updated_at);
}

#[rstest]
#[tokio::test]
async fn missing_rows_report_false_or_none(store: InMemoryStore) {
    assert!(!UserRepository::delete(&store, &UserId::random())
        .await
        .expect("delete"));
    assert!(TestEntityRepository::find_by_id(&store, &TestEntityId::random())
        .await
        .expect("lookup")
        .is_none());
}

#[rstest]
#[tokio::test]
async fn test_entities_round_trip(store: InMemoryStore) {
    let created = TestEntityRepository::create(
        &store,
        &NewTestEntity {
            id: TestEntityId::random(),
            name: "probe".to_owned(),
            status: TestEntityStatus::Pending,
        },
    )
    .await
    .expect("insert");

    let listed = TestEntityRepository::find_all(&store).await.expect("list");
    assert_eq!(listed, vec![created]);
}

#[rstest]
#[tokio::test]
async fn schema_status_reports_all_tables(store: InMemoryStore) {
    let status = SchemaMigrator::status(&store).await.expect("status");
    assert_eq!(status.tables.len(), APPLICATION_TABLES.len());
    assert!(status.tables.values().all(|present| *present));
}
