//! Application health reporting.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tracing::error;

use crate::domain::ports::{DatabaseHealth, DatabaseProbe, HealthQuery, HealthReport};

/// Health service implementing [`HealthQuery`] over a [`DatabaseProbe`].
#[derive(Clone)]
pub struct HealthService<P> {
    probe: Arc<P>,
    version: String,
}

impl<P> HealthService<P> {
    /// Create a service reporting `version` alongside probe results.
    pub fn new(probe: Arc<P>, version: impl Into<String>) -> Self {
        Self {
            probe,
            version: version.into(),
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl<P> HealthQuery for HealthService<P>
where
    P: DatabaseProbe,
{
    async fn check(&self) -> HealthReport {
        let started = Instant::now();
        let outcome = self.probe.ping().await;
        let latency_ms = elapsed_ms(started);

        let database = match outcome {
            Ok(()) => DatabaseHealth {
                connected: true,
                latency_ms,
                error: None,
            },
            Err(err) => {
                error!(error = %err, latency_ms, "health check failed: database unreachable");
                DatabaseHealth {
                    connected: false,
                    latency_ms,
                    error: Some(err.to_string()),
                }
            }
        };

        HealthReport {
            checked_at: Utc::now(),
            database,
            version: self.version.clone(),
        }
    }
}
