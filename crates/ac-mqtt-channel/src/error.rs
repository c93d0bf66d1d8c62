//! MQTT channel error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while configuring or using the broker connection.
#[derive(Debug, Error)]
pub enum MqttError {
    #[error("invalid broker URI: {0}")]
    InvalidUri(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("publish error: {0}")]
    Publish(String),

    #[error("broker did not complete within {0:?}")]
    Timeout(Duration),
}

impl MqttError {
    /// True for failures of a live broker exchange, as opposed to startup configuration.
    pub fn is_broker_failure(&self) -> bool {
        matches!(
            self,
            MqttError::Connection(_) | MqttError::Publish(_) | MqttError::Timeout(_)
        )
    }
}

/// Convenience alias for MQTT results.
pub type MqttResult<T> = Result<T, MqttError>;
