//! Backend entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use company_api::inbound::http::health::HealthState;
use company_api::outbound::persistence::{DbPool, run_pending_migrations};
use company_api::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

fn config_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

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

    let settings = AppSettings::load_from_iter(std::env::args_os()).map_err(config_error)?;
    let bind_addr = settings.bind_addr().map_err(config_error)?;
    let jwt = settings.jwt_settings().map_err(config_error)?;

    if settings.run_migrations() {
        let url = settings.database_url().map_err(config_error)?;
        let applied = run_pending_migrations(url).await.map_err(config_error)?;
        info!(applied, "database migrations complete");
    }

    let pool_config = settings.pool_config().map_err(config_error)?;
    let max_connections = pool_config.max_size();
    let pool = DbPool::new(pool_config).await.map_err(config_error)?;
    info!(max_connections, %bind_addr, "starting company-api");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, pool, jwt))?;
    server.await
}
