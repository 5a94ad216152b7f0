//! Tests for the organization use cases.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockOrganizationRepository;

fn organization(name: &str, document: Option<&str>) -> Organization {
    let now = Utc::now();
    Organization {
        id: OrganizationId::random(),
        name: name.to_owned(),
        document: document.map(str::to_owned),
        created_at: now,
        updated_at: now,
    }
}

fn stored(new: &NewOrganization) -> Organization {
    let now = Utc::now();
    Organization {
        id: new.id,
        name: new.name.clone(),
        document: new.document.clone(),
        created_at: now,
        updated_at: now,
    }
}

fn make_service(repo: MockOrganizationRepository) -> OrganizationsService<MockOrganizationRepository> {
    OrganizationsService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn create_trims_name_and_checks_both_keys() {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_name()
        .withf(|name| name == "Acme")
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_find_by_document()
        .withf(|document| document == "123")
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_create()
        .times(1)
        .returning(|new| Ok(stored(new)));

    let created = make_service(repo)
        .create(CreateOrganizationRequest {
            name: Some("  Acme ".to_owned()),
            document: Some(" 123 ".to_owned()),
        })
        .await
        .expect("create succeeds");

    assert_eq!(created.name, "Acme");
    assert_eq!(created.document.as_deref(), Some("123"));
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
#[tokio::test]
async fn create_requires_name(#[case] name: Option<&str>) {
    let error = make_service(MockOrganizationRepository::new())
        .create(CreateOrganizationRequest {
            name: name.map(str::to_owned),
            document: None,
        })
        .await
        .expect_err("name required");
    assert_eq!(error.code(), ErrorCode::InvalidName);
    assert_eq!(error.message(), "Organization name is required");
}

#[rstest]
#[tokio::test]
async fn create_rejects_duplicate_name_without_insert() {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_name()
        .return_once(|_| Ok(Some(organization("Acme", None))));
    repo.expect_create().never();

    let error = make_service(repo)
        .create(CreateOrganizationRequest {
            name: Some("Acme".to_owned()),
            document: None,
        })
        .await
        .expect_err("duplicate name");
    assert_eq!(error.code(), ErrorCode::NameAlreadyExists);
    assert_eq!(error.message(), "Organization with this name already exists");
}

#[rstest]
#[tokio::test]
async fn create_rejects_duplicate_document() {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_name().return_once(|_| Ok(None));
    repo.expect_find_by_document()
        .return_once(|_| Ok(Some(organization("Other", Some("123")))));
    repo.expect_create().never();

    let error = make_service(repo)
        .create(CreateOrganizationRequest {
            name: Some("Acme".to_owned()),
            document: Some("123".to_owned()),
        })
        .await
        .expect_err("duplicate document");
    assert_eq!(error.code(), ErrorCode::DocumentAlreadyExists);
}

#[rstest]
#[tokio::test]
async fn blank_document_skips_document_lookup() {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_name().return_once(|_| Ok(None));
    repo.expect_find_by_document().never();
    repo.expect_create().returning(|new| Ok(stored(new)));

    let created = make_service(repo)
        .create(CreateOrganizationRequest {
            name: Some("Acme".to_owned()),
            document: Some("  ".to_owned()),
        })
        .await
        .expect("create succeeds");
    assert!(created.document.is_none());
}

#[rstest]
#[case("name", ErrorCode::NameAlreadyExists)]
#[case("document", ErrorCode::DocumentAlreadyExists)]
#[tokio::test]
async fn storage_unique_violation_maps_to_conflict(#[case] field: &str, #[case] code: ErrorCode) {
    let field = field.to_owned();
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_name().return_once(|_| Ok(None));
    repo.expect_create()
        .return_once(move |_| Err(OrganizationRepositoryError::unique_violation(field)));

    let error = make_service(repo)
        .create(CreateOrganizationRequest {
            name: Some("Acme".to_owned()),
            document: None,
        })
        .await
        .expect_err("conflict");
    assert_eq!(error.code(), code);
}

#[rstest]
#[tokio::test]
async fn update_allows_keeping_own_name() {
    let existing = organization("Acme", None);
    let id = existing.id;
    let found = existing.clone();
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_name()
        .return_once(move |_| Ok(Some(found)));
    repo.expect_update()
        .times(1)
        .return_once(move |_, _| Ok(Some(existing)));

    let updated = make_service(repo)
        .update(UpdateOrganizationRequest {
            id,
            name: Some("Acme".to_owned()),
            document: None,
        })
        .await
        .expect("update succeeds");
    assert_eq!(updated.id, id);
}

#[rstest]
#[tokio::test]
async fn update_rejects_name_held_by_another() {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_name()
        .return_once(|_| Ok(Some(organization("Acme", None))));
    repo.expect_update().never();

    let error = make_service(repo)
        .update(UpdateOrganizationRequest {
            id: OrganizationId::random(),
            name: Some("Acme".to_owned()),
            document: None,
        })
        .await
        .expect_err("conflict");
    assert_eq!(error.code(), ErrorCode::NameAlreadyExists);
}

#[rstest]
#[tokio::test]
async fn update_unknown_organization_is_not_found() {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_document().return_once(|_| Ok(None));
    repo.expect_update().return_once(|_, _| Ok(None));
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let error = make_service(repo)
        .update(UpdateOrganizationRequest {
            id: OrganizationId::random(),
            name: None,
            document: Some(Some("999".to_owned())),
        })
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_race_reports_the_field_that_was_claimed() {
    let existing = organization("Acme", None);
    let id = existing.id;
    let document_lookups = Arc::new(AtomicUsize::new(0));
    let lookups = Arc::clone(&document_lookups);
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_name().times(2).returning(|_| Ok(None));
    repo.expect_find_by_document().times(2).returning(move |_| {
        // A concurrent writer takes the document between the two lookups.
        if lookups.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(None)
        } else {
            Ok(Some(organization("Rival", Some("123"))))
        }
    });
    repo.expect_update().times(1).return_once(|_, _| Ok(None));
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));

    let error = make_service(repo)
        .update(UpdateOrganizationRequest {
            id,
            name: Some("Acme Renamed".to_owned()),
            document: Some(Some("123".to_owned())),
        })
        .await
        .expect_err("conflict");
    assert_eq!(error.code(), ErrorCode::DocumentAlreadyExists);
    assert_eq!(document_lookups.load(Ordering::SeqCst), 2);
}

#[rstest]
#[tokio::test]
async fn delete_missing_organization_is_not_found() {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_delete().return_once(|_| Ok(false));

    let error = make_service(repo)
        .delete(&OrganizationId::random())
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
