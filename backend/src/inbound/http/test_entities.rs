//! Test entity API handlers.
//!
//! ```text
//! POST   /api/test-entity       {"name":"Sample","status":"pending"}
//! GET    /api/test-entity
//! GET    /api/test-entity/{id}
//! DELETE /api/test-entity/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateTestEntityRequest;
use crate::domain::{TestEntity, TestEntityId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TestEntitySchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID_FIELD, parse_path_id};

/// Request body for `POST /api/test-entity`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestEntityBody {
    #[schema(example = "Sample")]
    pub name: Option<String>,
    /// One of `active`, `inactive`, `pending`. Defaults to `active`.
    #[schema(example = "active")]
    pub status: Option<String>,
}

/// Listing envelope for `GET /api/test-entity`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestEntityList {
    #[schema(value_type = Vec<TestEntitySchema>)]
    pub data: Vec<TestEntity>,
    pub count: usize,
}

impl From<Vec<TestEntity>> for TestEntityList {
    fn from(data: Vec<TestEntity>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Create a test entity.
#[utoipa::path(
    post,
    path = "/api/test-entity",
    request_body = CreateTestEntityBody,
    responses(
        (status = 201, description = "Entity created", body = TestEntitySchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["test-entity"],
    operation_id = "createTestEntity"
)]
#[post("/test-entity")]
pub async fn create_test_entity(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTestEntityBody>,
) -> ApiResult<HttpResponse> {
    let CreateTestEntityBody { name, status } = payload.into_inner();
    let entity = state
        .test_entities
        .create(CreateTestEntityRequest { name, status })
        .await?;
    Ok(HttpResponse::Created().json(entity))
}

/// List test entities, newest first.
#[utoipa::path(
    get,
    path = "/api/test-entity",
    responses(
        (status = 200, description = "Entities and their count", body = TestEntityList),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["test-entity"],
    operation_id = "listTestEntities"
)]
#[get("/test-entity")]
pub async fn list_test_entities(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let entities = state.test_entities_query.list().await?;
    Ok(HttpResponse::Ok().json(TestEntityList::from(entities)))
}

/// Fetch one test entity.
#[utoipa::path(
    get,
    path = "/api/test-entity/{id}",
    params(("id" = String, Path, description = "Entity identifier")),
    responses(
        (status = 200, description = "Entity", body = TestEntitySchema),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["test-entity"],
    operation_id = "getTestEntity"
)]
#[get("/test-entity/{id}")]
pub async fn get_test_entity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: TestEntityId = parse_path_id(&path, ID_FIELD)?;
    let entity = state.test_entities_query.get(&id).await?;
    Ok(HttpResponse::Ok().json(entity))
}

/// Delete a test entity.
#[utoipa::path(
    delete,
    path = "/api/test-entity/{id}",
    params(("id" = String, Path, description = "Entity identifier")),
    responses(
        (status = 204, description = "Entity deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["test-entity"],
    operation_id = "deleteTestEntity"
)]
#[delete("/test-entity/{id}")]
pub async fn delete_test_entity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: TestEntityId = parse_path_id(&path, ID_FIELD)?;
    state.test_entities.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
