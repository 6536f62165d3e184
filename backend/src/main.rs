//! Service entry point: loads settings, connects the directory and serves
//! the listing API.

mod server;

use actix_web::cookie::SameSite;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mailadmin::inbound::http::health::HealthState;
use mailadmin::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|error| std::io::Error::other(format!("failed to load settings: {error}")))?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(
        settings.session_key()?,
        settings.cookie_secure,
        SameSite::Lax,
        bind_addr,
    )
    .with_items_per_page(settings.items_per_page());

    if let Some(database_url) = settings.database_url.as_deref() {
        if settings.run_migrations {
            run_migrations(database_url)
                .await
                .map_err(|error| std::io::Error::other(error.to_string()))?;
        }
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|error| std::io::Error::other(error.to_string()))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
