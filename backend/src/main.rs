//! Backend entry-point: loads settings, prepares persistence and serves the
//! REST API with its OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use stockflow::inbound::http::health::HealthState;
use stockflow::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use stockflow::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config =
        ServerConfig::new(bind_addr).with_migration_token(settings.migration_token());
    match settings.database_url() {
        Some(database_url) => {
            if settings.run_migrations {
                apply_startup_migrations(database_url.clone()).await;
            }
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
            )
            .await
            .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; serving from in-memory storage"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    let server = create_server(health_state, config)?;
    server.await
}

/// Run embedded migrations before accepting traffic.
///
/// Diesel's migration harness is synchronous, so it runs on the blocking pool.
/// Failures are logged and the server still starts; `POST /api/migrate` can
/// apply the schema later. Returns whether the schema is up to date.
async fn apply_startup_migrations(database_url: String) -> bool {
    match tokio::task::spawn_blocking(move || run_pending_migrations(&database_url)).await {
        Ok(Ok(applied)) => {
            info!(count = applied.len(), ?applied, "startup migrations complete");
            true
        }
        Ok(Err(e)) => {
            warn!(error = %e, "startup migrations failed; continuing without them");
            false
        }
        Err(e) => {
            warn!(error = %e, "startup migration task failed; continuing without it");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    //! Startup behaviour when the database misbehaves.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn unreachable_database_does_not_abort_startup_migrations() {
        let applied =
            apply_startup_migrations("postgres://stockflow@127.0.0.1:1/stockflow".to_owned())
                .await;
        assert!(!applied);
    }
}
