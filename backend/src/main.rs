//! Backend entry-point: loads settings, selects the storage backend and
//! serves the REST API, health probes and (in debug builds) Swagger UI.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{
    BuildMode, fingerprint::key_fingerprint, session_settings_from_env,
};
use server::{AppSettings, ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| io::Error::other(format!("settings: {err}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| io::Error::other(format!("session settings: {err}")))?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io::Error::other(err.to_string()))?;
    let built = build_http_state(&settings).await?;
    let health_state = web::Data::new(HealthState::new(built.storage));

    let server = create_server(
        health_state.clone(),
        built.http_state,
        ServerConfig::new(
            session.key,
            session.cookie_secure,
            session.same_site,
            bind_addr,
        ),
    )?;
    info!(%bind_addr, storage = ?built.storage, "listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
