//! Test entity use cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CreateTestEntityRequest, TestEntitiesCommand, TestEntitiesQuery, TestEntityRepository,
    TestEntityRepositoryError,
};
use crate::domain::test_entity::normalise_test_entity_name;
use crate::domain::{Error, NewTestEntity, TestEntity, TestEntityId, TestEntityStatus};

fn map_repository_error(error: TestEntityRepositoryError) -> Error {
    match error {
        TestEntityRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("test entity repository unavailable: {message}"))
        }
        TestEntityRepositoryError::Query { message } => {
            Error::internal(format!("test entity repository error: {message}"))
        }
    }
}

fn test_entity_not_found() -> Error {
    Error::not_found("Test entity not found")
}

/// Service implementing [`TestEntitiesCommand`] and [`TestEntitiesQuery`].
#[derive(Clone)]
pub struct TestEntitiesService<R> {
    repository: Arc<R>,
}

impl<R> TestEntitiesService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> TestEntitiesCommand for TestEntitiesService<R>
where
    R: TestEntityRepository,
{
    async fn create(&self, request: CreateTestEntityRequest) -> Result<TestEntity, Error> {
        let name = normalise_test_entity_name(request.name.as_deref().unwrap_or_default())?;
        let status = match request.status.as_deref() {
            Some(raw) => raw.parse::<TestEntityStatus>()?,
            None => TestEntityStatus::default(),
        };

        let entity = self
            .repository
            .create(&NewTestEntity {
                id: TestEntityId::random(),
                name,
                status,
            })
            .await
            .map_err(map_repository_error)?;

        info!(test_entity_id = %entity.id, status = %entity.status, "test entity created");
        Ok(entity)
    }

    async fn delete(&self, id: &TestEntityId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if removed {
            Ok(())
        } else {
            Err(test_entity_not_found())
        }
    }
}

#[async_trait]
impl<R> TestEntitiesQuery for TestEntitiesService<R>
where
    R: TestEntityRepository,
{
    async fn list(&self) -> Result<Vec<TestEntity>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: &TestEntityId) -> Result<TestEntity, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(test_entity_not_found)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockTestEntityRepository;

    fn stored(new: &NewTestEntity) -> TestEntity {
        TestEntity {
            id: new.id,
            name: new.name.clone(),
            status: new.status,
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockTestEntityRepository) -> TestEntitiesService<MockTestEntityRepository> {
        TestEntitiesService::new(Arc::new(repo))
    }

    #[rstest]
    #[case(None, TestEntityStatus::Active)]
    #[case(Some(" pending "), TestEntityStatus::Pending)]
    #[case(Some("inactive"), TestEntityStatus::Inactive)]
    #[tokio::test]
    async fn create_resolves_status(
        #[case] status: Option<&str>,
        #[case] expected: TestEntityStatus,
    ) {
        let mut repo = MockTestEntityRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|new| Ok(stored(new)));

        let entity = service(repo)
            .create(CreateTestEntityRequest {
                name: Some(" probe ".to_owned()),
                status: status.map(str::to_owned),
            })
            .await
            .expect("create succeeds");
        assert_eq!(entity.status, expected);
        assert_eq!(entity.name, "probe");
    }

    #[rstest]
    #[case(Some(""), None, ErrorCode::InvalidName)]
    #[case(None, None, ErrorCode::InvalidName)]
    #[case(Some("probe"), Some("archived"), ErrorCode::InvalidStatus)]
    #[case(Some("probe"), Some(""), ErrorCode::InvalidStatus)]
    #[tokio::test]
    async fn create_rejects_invalid_input(
        #[case] name: Option<&str>,
        #[case] status: Option<&str>,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockTestEntityRepository::new();
        repo.expect_create().never();

        let error = service(repo)
            .create(CreateTestEntityRequest {
                name: name.map(str::to_owned),
                status: status.map(str::to_owned),
            })
            .await
            .expect_err("rejected");
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_name_reports_name_field() {
        let error = service(MockTestEntityRepository::new())
            .create(CreateTestEntityRequest {
                name: Some(String::new()),
                status: None,
            })
            .await
            .expect_err("rejected");
        assert_eq!(error.details(), Some(&serde_json::json!({ "field": "name" })));
    }

    #[rstest]
    #[tokio::test]
    async fn get_missing_entity_is_not_found() {
        let mut repo = MockTestEntityRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let error = service(repo)
            .get(&TestEntityId::random())
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn list_surfaces_connection_failures_as_unavailable() {
        let mut repo = MockTestEntityRepository::new();
        repo.expect_find_all()
            .return_once(|| Err(TestEntityRepositoryError::connection("timeout")));

        let error = service(repo).list().await.expect_err("unavailable");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
