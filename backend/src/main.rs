//! Quiz backend entry-point: loads configuration, wires the hosted backend
//! adapters and serves the REST API.

mod server;

use std::env;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use quiz_backend::config::AppSettings;
use quiz_backend::inbound::http::health::HealthState;

use server::create_server;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let config = settings
        .validate()
        .wrap_err("invalid configuration")?;
    info!(
        bind_addr = %config.bind_addr,
        supabase_url = %config.supabase.base_url,
        "starting quiz backend"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    server.await.wrap_err("server terminated with an error")
}
