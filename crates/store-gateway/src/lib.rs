//! Store Transport Gateway
//!
//! MQTT-based delivery of session events:
//! - Outbound envelopes published fire-and-forget
//! - Inbound pairing messages and operator commands forwarded to the
//!   decision core over a channel
//!
//! Delivery guarantees, reconnection, and backoff are the broker session's
//! concern; the decision core stays decoupled from transport health. When
//! the gateway never connected, publishing degrades to a logged no-op.

use event_protocol::Envelope;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Subscribe failed: {0}")]
    Subscribe(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Envelope encoding failed: {0}")]
    Encode(#[from] event_protocol::ProtocolError),
}

/// Which inbound channel a message arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Messages from the paired system (pairing requests)
    Inbound,
    /// Operator commands (begin/end shopping)
    Command,
}

/// Raw inbound message; decoding stays with the protocol crate
#[derive(Debug, Clone)]
pub struct GatewayMessage {
    pub channel: Channel,
    pub payload: String,
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// MQTT broker host
    pub broker_host: String,
    /// MQTT broker port
    pub broker_port: u16,
    /// Store identifier (topic component)
    pub store_id: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            store_id: 9763,
        }
    }
}

impl GatewayConfig {
    fn events_topic(&self) -> String {
        format!("stores/{}/events", self.store_id)
    }

    fn inbound_topic(&self) -> String {
        format!("stores/{}/inbound", self.store_id)
    }

    fn commands_topic(&self) -> String {
        format!("stores/{}/commands", self.store_id)
    }
}

/// MQTT transport gateway
pub struct StoreGateway {
    config: GatewayConfig,
    client: Option<AsyncClient>,
}

impl StoreGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Connect to the broker, subscribe to the inbound and command topics,
    /// and spawn the event-loop task forwarding publications to `inbound_tx`.
    pub async fn connect(
        &mut self,
        inbound_tx: mpsc::Sender<GatewayMessage>,
    ) -> Result<(), GatewayError> {
        let mut options = MqttOptions::new(
            format!("store-agent-{}", self.config.store_id),
            &self.config.broker_host,
            self.config.broker_port,
        );
        options.set_keep_alive(std::time::Duration::from_secs(30));

        let (client, mut eventloop) = AsyncClient::new(options, 10);

        client
            .subscribe(self.config.inbound_topic(), QoS::AtLeastOnce)
            .await
            .map_err(|e| GatewayError::Subscribe(e.to_string()))?;
        client
            .subscribe(self.config.commands_topic(), QoS::AtLeastOnce)
            .await
            .map_err(|e| GatewayError::Subscribe(e.to_string()))?;

        let inbound_topic = self.config.inbound_topic();
        let commands_topic = self.config.commands_topic();

        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        let channel = if publish.topic == inbound_topic {
                            Channel::Inbound
                        } else if publish.topic == commands_topic {
                            Channel::Command
                        } else {
                            debug!("publication on unexpected topic {}", publish.topic);
                            continue;
                        };

                        let payload = match String::from_utf8(publish.payload.to_vec()) {
                            Ok(text) => text,
                            Err(_) => {
                                debug!("dropping non-utf8 payload on {}", publish.topic);
                                continue;
                            }
                        };

                        if inbound_tx
                            .send(GatewayMessage { channel, payload })
                            .await
                            .is_err()
                        {
                            // Receiver gone: the engine shut down
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("MQTT error: {}", e);
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    }
                }
            }
        });

        self.client = Some(client);
        info!(
            "Connected to MQTT broker: {}:{}",
            self.config.broker_host, self.config.broker_port
        );
        Ok(())
    }

    /// Publish an envelope to the store's event topic.
    ///
    /// Fire-and-forget: with no broker connection the envelope is dropped
    /// with a warning and Ok is returned, so frame processing never stalls
    /// on transport health.
    pub async fn publish(&self, envelope: &Envelope) -> Result<(), GatewayError> {
        let client = match &self.client {
            Some(client) => client,
            None => {
                warn!(
                    event = envelope.payload.type_name(),
                    "gateway not connected, dropping outbound event"
                );
                return Ok(());
            }
        };

        let payload = envelope.encode()?;
        client
            .publish(
                self.config.events_topic(),
                QoS::AtLeastOnce,
                false,
                payload,
            )
            .await
            .map_err(|e| GatewayError::Publish(e.to_string()))?;

        debug!(event = envelope.payload.type_name(), "event published");
        Ok(())
    }

    /// Whether a broker session was established
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }
}
