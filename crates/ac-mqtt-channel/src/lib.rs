//! MQTT channel for the aircon controller.
//!
//! - `ConnectionConfig` built once from the broker URI and CA bundle
//! - `Publisher` trait for publishing (mockable in tests)
//! - `OneShotPublisher`: fresh TLS connection per publish
//! - `MockPublisher` for testing without a broker

pub mod config;
pub mod error;
pub mod mock;
pub mod publisher;
pub mod tls;

// Re-exports for convenience.
pub use config::ConnectionConfig;
pub use error::{MqttError, MqttResult};
pub use mock::MockPublisher;
pub use publisher::{OneShotPublisher, PublishRequest, Publisher};
pub use rumqttc::QoS;
