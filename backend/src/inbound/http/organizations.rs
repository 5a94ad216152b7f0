//! Organizations API handlers.
//!
//! ```text
//! POST   /api/organizations       {"name":"Acme","document":"12.345.678/0001-90"}
//! GET    /api/organizations
//! GET    /api/organizations/{id}
//! PUT    /api/organizations/{id}  {"document":null}
//! DELETE /api/organizations/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::OrganizationId;
use crate::domain::ports::{CreateOrganizationRequest, UpdateOrganizationRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, OrganizationSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID_FIELD, double_option, parse_path_id};

/// Request body for `POST /api/organizations`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationBody {
    #[schema(example = "Acme Ltda")]
    pub name: Option<String>,
    #[schema(example = "12.345.678/0001-90")]
    pub document: Option<String>,
}

impl From<CreateOrganizationBody> for CreateOrganizationRequest {
    fn from(body: CreateOrganizationBody) -> Self {
        Self {
            name: body.name,
            document: body.document,
        }
    }
}

/// Partial update body for `PUT /api/organizations/{id}`. `null` clears the
/// document.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationBody {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub document: Option<Option<String>>,
}

/// Create an organization.
#[utoipa::path(
    post,
    path = "/api/organizations",
    request_body = CreateOrganizationBody,
    responses(
        (status = 201, description = "Organization created", body = OrganizationSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Name or document already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["organizations"],
    operation_id = "createOrganization"
)]
#[post("/organizations")]
pub async fn create_organization(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrganizationBody>,
) -> ApiResult<HttpResponse> {
    let organization = state
        .organizations
        .create(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(organization))
}

/// List organizations, newest first.
#[utoipa::path(
    get,
    path = "/api/organizations",
    responses(
        (status = 200, description = "Organizations", body = [OrganizationSchema]),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["organizations"],
    operation_id = "listOrganizations"
)]
#[get("/organizations")]
pub async fn list_organizations(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let organizations = state.organizations_query.list().await?;
    Ok(HttpResponse::Ok().json(organizations))
}

/// Fetch one organization.
#[utoipa::path(
    get,
    path = "/api/organizations/{id}",
    params(("id" = String, Path, description = "Organization identifier")),
    responses(
        (status = 200, description = "Organization", body = OrganizationSchema),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["organizations"],
    operation_id = "getOrganization"
)]
#[get("/organizations/{id}")]
pub async fn get_organization(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: OrganizationId = parse_path_id(&path, ID_FIELD)?;
    let organization = state.organizations_query.get(&id).await?;
    Ok(HttpResponse::Ok().json(organization))
}

/// Apply a partial update to an organization.
#[utoipa::path(
    put,
    path = "/api/organizations/{id}",
    params(("id" = String, Path, description = "Organization identifier")),
    request_body = UpdateOrganizationBody,
    responses(
        (status = 200, description = "Updated organization", body = OrganizationSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name or document already registered", body = ErrorSchema)
    ),
    tags = ["organizations"],
    operation_id = "updateOrganization"
)]
#[put("/organizations/{id}")]
pub async fn update_organization(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateOrganizationBody>,
) -> ApiResult<HttpResponse> {
    let id: OrganizationId = parse_path_id(&path, ID_FIELD)?;
    let UpdateOrganizationBody { name, document } = payload.into_inner();
    let organization = state
        .organizations
        .update(UpdateOrganizationRequest { id, name, document })
        .await?;
    Ok(HttpResponse::Ok().json(organization))
}

/// Delete an organization. Affiliated users are detached, not deleted.
#[utoipa::path(
    delete,
    path = "/api/organizations/{id}",
    params(("id" = String, Path, description = "Organization identifier")),
    responses(
        (status = 204, description = "Organization deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["organizations"],
    operation_id = "deleteOrganization"
)]
#[delete("/organizations/{id}")]
pub async fn delete_organization(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: OrganizationId = parse_path_id(&path, ID_FIELD)?;
    state.organizations.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use crate::domain::ports::OrganizationRepository;
    use crate::inbound::http::api_scope;
    use crate::inbound::http::test_utils::memory_state;

    #[actix_web::test]
    async fn duplicate_name_is_rejected_without_mutation() {
        let (state, store) = memory_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(api_scope()),
        )
        .await;

        let first = actix_test::TestRequest::post()
            .uri("/api/organizations")
            .set_json(json!({"name": "Acme", "document": "111"}))
            .to_request();
        let response = actix_test::call_service(&app, first).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let second = actix_test::TestRequest::post()
            .uri("/api/organizations")
            .set_json(json!({"name": "  Acme ", "document": "222"}))
            .to_request();
        let response = actix_test::call_service(&app, second).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "NAME_ALREADY_EXISTS");
        assert_eq!(body["error"], "Organization with this name already exists");

        let stored = OrganizationRepository::find_all(&store)
            .await
            .expect("organizations listed");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].document.as_deref(), Some("111"));
    }

    #[actix_web::test]
    async fn blank_name_is_invalid() {
        let (state, _store) = memory_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(api_scope()),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/api/organizations")
            .set_json(json!({"name": "   "}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "INVALID_NAME");
        assert_eq!(body["error"], "Organization name is required");
    }

    #[actix_web::test]
    async fn update_clears_document_and_delete_detaches() {
        let (state, _store) = memory_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(api_scope()),
        )
        .await;

        let create = actix_test::TestRequest::post()
            .uri("/api/organizations")
            .set_json(json!({"name": "Acme", "document": "111"}))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, create).await;
        let org_id = created["id"].as_str().expect("id").to_owned();

        let member = actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({
                "email": "member@example.com",
                "password": "secret1",
                "organizationId": org_id,
            }))
            .to_request();
        let member: Value = actix_test::call_and_read_body_json(&app, member).await;
        assert_eq!(member["organizationId"], json!(org_id));
        let member_id = member["id"].as_str().expect("id").to_owned();

        let update = actix_test::TestRequest::put()
            .uri(&format!("/api/organizations/{org_id}"))
            .set_json(json!({"document": null}))
            .to_request();
        let updated: Value = actix_test::call_and_read_body_json(&app, update).await;
        assert_eq!(updated["name"], "Acme");
        assert!(updated["document"].is_null());

        let delete = actix_test::TestRequest::delete()
            .uri(&format!("/api/organizations/{org_id}"))
            .to_request();
        let response = actix_test::call_service(&app, delete).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let fetch = actix_test::TestRequest::get()
            .uri(&format!("/api/users/{member_id}"))
            .to_request();
        let fetched: Value = actix_test::call_and_read_body_json(&app, fetch).await;
        assert!(fetched["organizationId"].is_null());
    }

    #[actix_web::test]
    async fn unknown_organization_is_not_found() {
        let (state, _store) = memory_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(api_scope()),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/api/organizations/3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
