//! Operator endpoints for schema maintenance.
//!
//! ```text
//! POST /api/migrate   Authorization: Bearer <token>
//! GET  /api/migrate
//! ```
//!
//! The POST route only parses the `Authorization` header; deciding whether
//! the token is acceptable belongs to the maintenance use case.

use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, get, http::header, post, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{AppliedMigration, MigrationRun, SchemaStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(request: &HttpRequest) -> Result<&str, Error> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| Error::unauthorized("Authorization token required"))
}

/// Body of a successful `POST /api/migrate`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MigrationRunResponse {
    pub success: bool,
    #[schema(example = "Migrations applied successfully")]
    pub message: String,
    /// Versions applied by this run.
    pub applied: Vec<String>,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

impl From<MigrationRun> for MigrationRunResponse {
    fn from(run: MigrationRun) -> Self {
        let message = if run.applied.is_empty() {
            "Database schema is up to date"
        } else {
            "Migrations applied successfully"
        };
        Self {
            success: true,
            message: message.to_owned(),
            applied: run.applied,
            timestamp: run.finished_at,
        }
    }
}

/// One entry of `recentMigrations`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppliedMigrationBody {
    #[schema(example = "20250101000000")]
    pub version: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub run_on: Option<DateTime<Utc>>,
}

impl From<AppliedMigration> for AppliedMigrationBody {
    fn from(value: AppliedMigration) -> Self {
        Self {
            version: value.version,
            run_on: value.run_on,
        }
    }
}

/// Body of `GET /api/migrate` when the database answered.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaStatusResponse {
    #[schema(value_type = String, example = "connected")]
    pub database: &'static str,
    pub tables: BTreeMap<String, bool>,
    pub migrations_applied: usize,
    pub recent_migrations: Vec<AppliedMigrationBody>,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

impl From<SchemaStatus> for SchemaStatusResponse {
    fn from(status: SchemaStatus) -> Self {
        Self {
            database: "connected",
            tables: status.tables,
            migrations_applied: status.applied_count,
            recent_migrations: status.recent.into_iter().map(Into::into).collect(),
            timestamp: Utc::now(),
        }
    }
}

/// Body of `GET /api/migrate` when the database could not be inspected.
#[derive(Debug, Serialize, ToSchema)]
pub struct SchemaUnavailableResponse {
    #[schema(value_type = String, example = "disconnected")]
    pub database: &'static str,
    pub error: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

/// Apply pending schema migrations.
#[utoipa::path(
    post,
    path = "/api/migrate",
    responses(
        (status = 200, description = "Migrations applied", body = MigrationRunResponse),
        (status = 401, description = "Missing or malformed bearer token", body = ErrorSchema),
        (status = 403, description = "Token rejected", body = ErrorSchema),
        (status = 500, description = "Migration failed", body = ErrorSchema)
    ),
    security(("MaintenanceToken" = [])),
    tags = ["maintenance"],
    operation_id = "runMigrations"
)]
#[post("/migrate")]
pub async fn run_migrations(
    state: web::Data<HttpState>,
    request: HttpRequest,
) -> ApiResult<HttpResponse> {
    let token = bearer_token(&request)?;
    let run = state.maintenance.migrate(token).await?;
    Ok(HttpResponse::Ok().json(MigrationRunResponse::from(run)))
}

/// Report table presence and recently applied migrations.
#[utoipa::path(
    get,
    path = "/api/migrate",
    responses(
        (status = 200, description = "Schema status", body = SchemaStatusResponse),
        (status = 500, description = "Database unavailable", body = SchemaUnavailableResponse)
    ),
    tags = ["maintenance"],
    operation_id = "migrationStatus"
)]
#[get("/migrate")]
pub async fn migration_status(state: web::Data<HttpState>) -> HttpResponse {
    match state.maintenance.status().await {
        Ok(status) => HttpResponse::Ok().json(SchemaStatusResponse::from(status)),
        Err(err) => {
            error!(error = %err, "schema status unavailable");
            HttpResponse::InternalServerError().json(SchemaUnavailableResponse {
                database: "disconnected",
                error: err.message().to_owned(),
                timestamp: Utc::now(),
            })
        }
    }
}
