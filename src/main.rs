//! Entry point: logging, configuration, and server startup.

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use coursebook::inbound::http::health::HealthState;
use coursebook::server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    server.await
}
