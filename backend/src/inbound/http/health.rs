//! Health endpoints.
//!
//! `GET /api/health` reports database connectivity with a real round-trip.
//! `/health/ready` and `/health/live` are cheap probes for orchestrators and
//! load balancers that never touch the database.
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::{DatabaseHealth, HealthReport};
use crate::inbound::http::state::HttpState;

/// Shared health state for readiness and liveness checks.
/// Track readiness and whether the process should report itself as alive to orchestrators.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness probes emit 503 to trigger restarts.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Overall verdict in a [`HealthResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Database section of a [`HealthResponse`].
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealthBody {
    pub connected: bool,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<DatabaseHealth> for DatabaseHealthBody {
    fn from(value: DatabaseHealth) -> Self {
        Self {
            connected: value.connected,
            latency_ms: value.latency_ms,
            error: value.error,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
    pub database: DatabaseHealthBody,
    #[schema(example = "0.1.0")]
    pub version: String,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        let status = if report.is_healthy() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        Self {
            status,
            timestamp: report.checked_at,
            database: report.database.into(),
            version: report.version,
        }
    }
}

/// Application health. Runs a real database query on every call.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Application and database are healthy", body = HealthResponse),
        (status = 500, description = "Database connection failed", body = HealthResponse)
    ),
    operation_id = "healthCheck"
)]
#[get("/health")]
pub async fn health_report(state: web::Data<HttpState>) -> HttpResponse {
    let body = HealthResponse::from(state.health.check().await);
    let mut response = match body.status {
        HealthStatus::Healthy => HttpResponse::Ok(),
        HealthStatus::Unhealthy => HttpResponse::InternalServerError(),
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}

/// Readiness probe. Return 200 when dependencies are initialised and the server can handle traffic; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
/// Call `HealthState::mark_unhealthy` before graceful shutdown to surface the drain early.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (
            status = 503,
            description = "Server is shutting down"
        )
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;
    use std::sync::Arc;

    use crate::domain::ports::MockHealthQuery;
    use crate::inbound::http::api_scope;
    use crate::inbound::http::test_utils::memory_state;

    fn report(connected: bool) -> HealthReport {
        HealthReport {
            checked_at: Utc::now(),
            database: DatabaseHealth {
                connected,
                latency_ms: 3,
                error: (!connected).then(|| "connection refused".to_owned()),
            },
            version: "1.2.3".to_owned(),
        }
    }

    async fn call_health(connected: bool) -> (StatusCode, Value) {
        let (mut state, _store) = memory_state();
        let mut health = MockHealthQuery::new();
        health
            .expect_check()
            .times(1)
            .return_once(move || report(connected));
        state.health = Arc::new(health);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(api_scope()),
        )
        .await;

        let request = actix_test::TestRequest::get().uri("/api/health").to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn healthy_report_is_ok() {
        let (status, body) = call_health(true).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"]["connected"], true);
        assert_eq!(body["database"]["latencyMs"], 3);
        assert!(body["database"].get("error").is_none());
        assert_eq!(body["version"], "1.2.3");
        assert!(body["timestamp"].as_str().is_some());
    }

    #[actix_web::test]
    async fn unhealthy_report_is_server_error() {
        let (status, body) = call_health(false).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["database"]["connected"], false);
        assert_eq!(body["database"]["error"], "connection refused");
    }

    #[actix_web::test]
    async fn memory_backend_reports_healthy() {
        let (state, _store) = memory_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(api_scope()),
        )
        .await;

        let request = actix_test::TestRequest::get().uri("/api/health").to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn probes_follow_health_state() {
        let health_state = web::Data::new(HealthState::new());
        let app = actix_test::init_service(
            App::new()
                .app_data(health_state.clone())
                .service(ready)
                .service(live),
        )
        .await;

        let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );

        health_state.mark_ready();
        let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        health_state.mark_unhealthy();
        let request = actix_test::TestRequest::get().uri("/health/live").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
