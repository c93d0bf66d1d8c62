//! Command publishing over a fresh TLS connection per message.
//!
//! Every call to `OneShotPublisher::publish` runs a full
//! connect → publish → disconnect cycle. Nothing is pooled or retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{AsyncClient, ConnectReturnCode, Event, EventLoop, Outgoing, Packet, QoS};

use ac_protocol::topics;

use crate::config::ConnectionConfig;
use crate::error::{MqttError, MqttResult};

// ── PublishRequest ────────────────────────────────────────────

/// A single outbound control message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub topic: String,
    pub payload: Vec<u8>,
    pub qos: QoS,
    pub retain: bool,
}

impl PublishRequest {
    /// Control message for the aircon: fire-and-forget, not retained.
    pub fn command(code: &str) -> Self {
        Self {
            topic: topics::AIRCON_CONTROL.to_string(),
            payload: code.as_bytes().to_vec(),
            qos: QoS::AtMostOnce,
            retain: false,
        }
    }

    /// Payload as text, for logging.
    pub fn payload_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

// ── Publisher trait ───────────────────────────────────────────

/// Abstraction over the broker publish path.
///
/// Enables mocking in tests without a real MQTT broker.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Deliver one message. Returns once the broker exchange is over.
    async fn publish(&self, request: &PublishRequest) -> MqttResult<()>;
}

// ── OneShotPublisher ──────────────────────────────────────────

/// Publisher that opens and closes its own connection for every message.
pub struct OneShotPublisher {
    config: Arc<ConnectionConfig>,
}

impl OneShotPublisher {
    pub fn new(config: Arc<ConnectionConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Publisher for OneShotPublisher {
    async fn publish(&self, request: &PublishRequest) -> MqttResult<()> {
        let options = self.config.mqtt_options();
        let client_id = options.client_id();
        let (client, mut eventloop) = AsyncClient::new(options, 10);

        let deadline = self.config.publish_timeout;
        let mut connected = false;

        let exchange = async {
            connect(&mut eventloop).await?;
            connected = true;
            tracing::debug!(
                client_id = %client_id,
                host = %self.config.host,
                port = self.config.port,
                "connected to broker"
            );
            send(&client, &mut eventloop, request).await
        };

        let result = match tokio::time::timeout(deadline, exchange).await {
            Ok(result) => result,
            Err(_) => Err(MqttError::Timeout(deadline)),
        };

        if connected {
            disconnect(&client, &mut eventloop, self.config.disconnect_grace).await;
        }

        match &result {
            Ok(()) => tracing::info!(
                topic = %request.topic,
                payload = %request.payload_str(),
                "command published"
            ),
            Err(e) => tracing::error!(
                client_id = %client_id,
                topic = %request.topic,
                error = %e,
                "broker publish failed"
            ),
        }
        result
    }
}

/// Drive the event loop until the broker accepts the connection.
async fn connect(eventloop: &mut EventLoop) -> MqttResult<()> {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                return match ack.code {
                    ConnectReturnCode::Success => Ok(()),
                    code => Err(MqttError::Connection(format!(
                        "broker refused connection: {code:?}"
                    ))),
                };
            }
            Ok(_) => {}
            Err(e) => return Err(MqttError::Connection(e.to_string())),
        }
    }
}

/// Queue the publish and drive the loop until it has been written out.
async fn send(
    client: &AsyncClient,
    eventloop: &mut EventLoop,
    request: &PublishRequest,
) -> MqttResult<()> {
    client
        .publish(
            request.topic.as_str(),
            request.qos,
            request.retain,
            request.payload.clone(),
        )
        .await
        .map_err(|e| MqttError::Publish(e.to_string()))?;

    loop {
        match eventloop.poll().await {
            Ok(Event::Outgoing(Outgoing::Publish(_))) => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(MqttError::Publish(e.to_string())),
        }
    }
}

/// Send DISCONNECT and give it `grace` to flush; the socket closes on drop.
async fn disconnect(client: &AsyncClient, eventloop: &mut EventLoop, grace: Duration) {
    if let Err(e) = client.disconnect().await {
        tracing::debug!(error = %e, "could not queue disconnect");
        return;
    }

    let flushed = tokio::time::timeout(grace, async {
        loop {
            match eventloop.poll().await {
                Ok(Event::Outgoing(Outgoing::Disconnect)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "event loop closed during disconnect");
                    break;
                }
            }
        }
    })
    .await;

    if flushed.is_err() {
        tracing::debug!(?grace, "disconnect grace period elapsed, closing");
    }
}
