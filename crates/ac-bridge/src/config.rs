//! Bridge configuration, read from the environment once at startup.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use ac_line_sdk::client::DEFAULT_API_BASE;
use thiserror::Error;

/// Errors in the process environment. All of them stop startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Top-level bridge configuration.
#[derive(Clone)]
pub struct BridgeConfig {
    /// Listen address (e.g., "0.0.0.0").
    pub host: String,
    /// Listen port (`PORT`).
    pub port: u16,
    /// LINE channel secret, used to verify webhook signatures.
    pub channel_secret: String,
    /// LINE channel access token, used for replies.
    pub channel_token: String,
    /// Broker URI with embedded credentials (`CLOUDMQTT_URL`).
    pub broker_url: String,
    /// PEM CA bundle for the broker's TLS certificate.
    pub ca_cert_path: PathBuf,
    /// Optional TOML command table replacing the built-in one.
    pub commands_file: Option<PathBuf>,
    /// MQTT client id prefix.
    pub mqtt_client_id: String,
    /// Upper bound on broker connect + publish.
    pub publish_timeout: Duration,
    /// LINE API base URL.
    pub line_api_base: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl BridgeConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: v,
            })?,
            None => default_port(),
        };

        let publish_timeout = match get("MQTT_PUBLISH_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "MQTT_PUBLISH_TIMEOUT_SECS",
                        value: v,
                    });
                }
            },
            None => Duration::from_secs(10),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(default_host),
            port,
            channel_secret: require("CHANNEL_SECRET")?,
            channel_token: require("CHANNEL_TOKEN")?,
            broker_url: require("CLOUDMQTT_URL")?,
            ca_cert_path: get("CA_CERT_PATH")
                .unwrap_or_else(|| "ca-certificates.crt".to_string())
                .into(),
            commands_file: get("COMMANDS_FILE").map(PathBuf::from),
            mqtt_client_id: get("MQTT_CLIENT_ID").unwrap_or_else(|| "LINE".to_string()),
            publish_timeout,
            line_api_base: get("LINE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("ca_cert_path", &self.ca_cert_path)
            .field("commands_file", &self.commands_file)
            .field("mqtt_client_id", &self.mqtt_client_id)
            .field("publish_timeout", &self.publish_timeout)
            .field("line_api_base", &self.line_api_base)
            .finish_non_exhaustive()
    }
}
