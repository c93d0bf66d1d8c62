//! Aircon bridge: LINE webhook server.
//!
//! Receives chat messages on `/callback`, publishes the matching aircon
//! command over TLS MQTT and replies to the sender.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ac_bridge::config::BridgeConfig;
use ac_bridge::routes;
use ac_bridge::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ac-bridge starting");

    let config = BridgeConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    tracing::info!(
        commands = state.commands.len(),
        ca_cert = %config.ca_cert_path.display(),
        "bridge state ready"
    );

    let app = routes::build_router(state);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
