//! Backend entry-point: loads settings, prepares storage, then serves the
//! REST API.

mod server;

use std::sync::Arc;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use carlot::domain::{Car, ResourceService, User};
use carlot::inbound::http::state::HttpState;
use carlot::outbound::persistence::ConnectionConfig;
use carlot::settings::AppSettings;
use carlot::startup::open_storage;
use server::{ServerConfig, create_server};

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

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let environment = settings.environment().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let storage = open_storage(
        ConnectionConfig::new(settings.database_url()),
        environment.is_development(),
    )
    .await
    .map_err(std::io::Error::other)?;
    info!(database = settings.database_url(), "storage initialised");

    let http_state = HttpState::new(
        Arc::new(ResourceService::<User, _>::new(storage.users)),
        Arc::new(ResourceService::<Car, _>::new(storage.cars)),
        environment,
    );
    let config = ServerConfig::new(bind_addr, environment).with_api_key(settings.api_key());

    create_server(http_state, config)?.await
}
