//! Shared application state for the Axum server.
//!
//! Everything here is immutable after startup; handlers only read it.

use std::sync::Arc;

use anyhow::Context;

use ac_line_sdk::{LineClient, Messenger};
use ac_mqtt_channel::{ConnectionConfig, OneShotPublisher, Publisher, tls};
use ac_protocol::CommandMapping;

use crate::config::BridgeConfig;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// LINE channel secret for signature checks.
    pub channel_secret: Arc<str>,
    /// Trigger → command table.
    pub commands: Arc<CommandMapping>,
    /// Broker publish path.
    pub publisher: Arc<dyn Publisher>,
    /// Reply path back to LINE.
    pub messenger: Arc<dyn Messenger>,
}

impl AppState {
    pub fn new(
        channel_secret: impl Into<Arc<str>>,
        commands: CommandMapping,
        publisher: Arc<dyn Publisher>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            channel_secret: channel_secret.into(),
            commands: Arc::new(commands),
            publisher,
            messenger,
        }
    }

    /// Build production state: CA bundle, broker config, command table, LINE client.
    pub fn from_config(config: &BridgeConfig) -> anyhow::Result<Self> {
        let ca_pem = tls::load_ca_bundle(&config.ca_cert_path)?;
        let connection = ConnectionConfig::from_uri(&config.broker_url, &ca_pem)
            .context("invalid broker configuration")?
            .with_client_id(config.mqtt_client_id.as_str())
            .with_publish_timeout(config.publish_timeout);
        tracing::info!(
            host = %connection.host,
            port = connection.port,
            "broker configured"
        );

        let commands = match &config.commands_file {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read command table '{}'", path.display()))?;
                CommandMapping::from_toml_str(&source)
                    .with_context(|| format!("invalid command table '{}'", path.display()))?
            }
            None => CommandMapping::builtin(),
        };

        let messenger = LineClient::new(config.channel_token.as_str(), config.line_api_base.as_str())?;

        Ok(Self::new(
            config.channel_secret.as_str(),
            commands,
            Arc::new(OneShotPublisher::new(Arc::new(connection))),
            Arc::new(messenger),
        ))
    }
}
