//! Delivery backend entry point: loads settings, wires adapters, and serves
//! the REST API.

mod server;

use std::ffi::OsString;

use actix_web::cookie::SameSite;
use actix_web::web;
use color_eyre::eyre::{Context, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::DbPool;
use server::{AppSettings, ServerConfig, create_server, load_session_key};

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;

    let key = load_session_key(&settings.session_key_file(), settings.session_allow_ephemeral)?;
    let bind_addr = settings.bind_addr()?;
    let policy = settings.proximity_policy()?;

    let mut config = ServerConfig::new(key, settings.cookie_secure, SameSite::Lax, bind_addr)
        .with_proximity_policy(policy)
        .with_courier_assignment(settings.courier_assignment_enabled)
        .with_fixture_login(settings.fixture_login_enabled());

    if let Some(pool_config) = settings.pool_config() {
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to connect to PostgreSQL")?;
        config = config.with_db_pool(pool);
    }

    info!(
        %bind_addr,
        courier_assignment_enabled = settings.courier_assignment_enabled,
        fixture_login = settings.fixture_login_enabled(),
        "starting delivery backend"
    );
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
