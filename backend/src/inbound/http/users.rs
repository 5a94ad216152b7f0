//! Users API handlers.
//!
//! ```text
//! POST   /api/users          {"email":"ada@example.com","password":"secret1"}
//! POST   /api/auth/register  {"email":"ada@example.com","password":"secret1"}
//! GET    /api/users
//! GET    /api/users/{id}
//! PUT    /api/users/{id}     {"name":"Ada","organizationId":null}
//! DELETE /api/users/{id}
//! ```
//!
//! Both registration routes run the same use case and return the same shape.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::UserId;
use crate::domain::ports::{RegisterUserRequest, UpdateUserRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserProfileSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID_FIELD, double_option, parse_path_id};

/// Registration body shared by `POST /api/users` and `POST /api/auth/register`.
///
/// Every field is optional at the JSON level so missing values surface as
/// domain validation errors with their specific codes.
#[derive(Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(format = Uuid)]
    pub organization_id: Option<String>,
    #[schema(example = "https://cdn.example.com/ada.png")]
    pub thumb: Option<String>,
}

impl From<RegisterUserBody> for RegisterUserRequest {
    fn from(body: RegisterUserBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
            name: body.name,
            organization_id: body.organization_id,
            thumb: body.thumb,
        }
    }
}

/// Partial update body for `PUT /api/users/{id}`.
///
/// Omitted keys leave the stored value unchanged. `null` clears `thumb` and
/// `organizationId`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub thumb: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Uuid)]
    pub organization_id: Option<Option<String>>,
}

impl UpdateUserBody {
    fn into_request(self, id: UserId) -> UpdateUserRequest {
        UpdateUserRequest {
            id,
            name: self.name,
            thumb: self.thumb,
            organization_id: self.organization_id,
        }
    }
}

async fn register(state: &HttpState, body: RegisterUserBody) -> ApiResult<HttpResponse> {
    let profile = state.users.register(body.into()).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User created", body = UserProfileSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    register(&state, payload.into_inner()).await
}

/// Register a user through the authentication route.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User registered", body = UserProfileSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "registerUser"
)]
#[post("/auth/register")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    register(&state, payload.into_inner()).await
}

/// List users, newest first.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserProfileSchema]),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users_query.list().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserProfileSchema),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_path_id(&path, ID_FIELD)?;
    let user = state.users_query.get(&id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Apply a partial update to a user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated user", body = UserProfileSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_path_id(&path, ID_FIELD)?;
    let user = state
        .users
        .update(payload.into_inner().into_request(id))
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_path_id(&path, ID_FIELD)?;
    state.users.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
