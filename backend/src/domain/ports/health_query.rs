//! Driving port for the application health report.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Outcome of the database round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    /// Whether the probe query succeeded.
    pub connected: bool,
    /// Wall-clock time spent on the probe.
    pub latency_ms: u64,
    /// Failure description when not connected.
    pub error: Option<String>,
}

/// Aggregated health report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// When the report was produced.
    pub checked_at: DateTime<Utc>,
    /// Database probe outcome.
    pub database: DatabaseHealth,
    /// Application version.
    pub version: String,
}

impl HealthReport {
    /// The application is healthy when the database answered.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.database.connected
    }
}

/// Produces health reports. Never fails: failures are part of the report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthQuery: Send + Sync {
    /// Probe dependencies and summarise.
    async fn check(&self) -> HealthReport;
}
