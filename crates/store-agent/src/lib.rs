//! Store Session Agent
//!
//! Wires the detector, decision core, and transport gateway together:
//! a producer task pulls frames from the detector on a fixed tick and sends
//! prediction batches down a bounded channel; a single engine task
//! processes frames, inbound messages, and commands one at a time, so no
//! two inputs are ever evaluated concurrently.

use anyhow::Result;
use detection::{ObjectDetector, VideoFrame};
use event_protocol::{
    decode_command, decode_inbound, Command, Envelope, EventPayload, InboundMessage,
};
use session_engine::{SessionEngine, StoreConfig};
use store_gateway::{Channel, GatewayConfig, GatewayMessage, StoreGateway};
use tokio::sync::mpsc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Decision core configuration
    pub store: StoreConfig,
    /// Gateway configuration
    pub gateway: GatewayConfig,
    /// Frame pull interval (≈30fps by default)
    pub frame_interval_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            gateway: GatewayConfig::default(),
            frame_interval_ms: 33,
        }
    }
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Route one gateway message through the engine.
///
/// Undecodable payloads produce no events; the drop policy lives in the
/// protocol crate.
pub fn handle_gateway_message(
    engine: &mut SessionEngine,
    message: &GatewayMessage,
) -> Vec<EventPayload> {
    match message.channel {
        Channel::Inbound => match decode_inbound(&message.payload) {
            Some(InboundMessage::PersonIdentified {
                pairing_id,
                area_id,
            }) => vec![engine.handle_pairing(pairing_id, area_id)],
            None => Vec::new(),
        },
        Channel::Command => match decode_command(&message.payload) {
            Some(Command::BeginShopping) => engine.begin_session(),
            Some(Command::EndShopping) => engine.end_session(),
            None => Vec::new(),
        },
    }
}

async fn emit(gateway: &StoreGateway, store_id: u32, events: Vec<EventPayload>) {
    for payload in events {
        let envelope = Envelope::new(store_id, payload);
        if let Err(e) = gateway.publish(&envelope).await {
            warn!(
                event = envelope.payload.type_name(),
                "failed to publish event: {e}"
            );
        }
    }
}

/// Run the agent until the frame producer stops.
pub async fn run_agent(config: AgentConfig, mut detector: Box<dyn ObjectDetector>) -> Result<()> {
    let mut engine = SessionEngine::new(config.store.clone());
    let store_id = config.store.store_id;

    let (frame_tx, mut frame_rx) = mpsc::channel(16);
    let (inbound_tx, mut inbound_rx) = mpsc::channel::<GatewayMessage>(32);
    // Held for the life of the loop so the inbound receiver stays open even
    // when the gateway never connected
    let _inbound_guard = inbound_tx.clone();

    let mut gateway = StoreGateway::new(config.gateway.clone());
    if let Err(e) = gateway.connect(inbound_tx).await {
        warn!("unable to connect to broker, events will be dropped: {e}");
    }

    info!(detector = detector.name(), "starting frame loop");
    let interval_ms = config.frame_interval_ms;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_millis(interval_ms));
        let mut sequence: u64 = 0;
        loop {
            ticker.tick().await;
            let frame = VideoFrame::blank(300, 300, sequence);
            sequence += 1;

            // A failed detection contributes an empty batch; retry policy
            // is not the core's concern
            let batch = match detector.detect(&frame) {
                Ok(batch) => batch,
                Err(e) => {
                    warn!("detector failed on frame {sequence}: {e}");
                    Vec::new()
                }
            };

            if frame_tx.send(batch).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            maybe_batch = frame_rx.recv() => match maybe_batch {
                Some(batch) => {
                    let events = engine.observe_frame(&batch);
                    emit(&gateway, store_id, events).await;
                }
                None => break,
            },
            maybe_message = inbound_rx.recv() => {
                if let Some(message) = maybe_message {
                    let events = handle_gateway_message(&mut engine, &message);
                    emit(&gateway, store_id, events).await;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(channel: Channel, payload: &str) -> GatewayMessage {
        GatewayMessage {
            channel,
            payload: payload.to_string(),
        }
    }

    #[test]
    fn test_begin_command_starts_session() {
        let mut engine = SessionEngine::new(StoreConfig::default());
        let events = handle_gateway_message(
            &mut engine,
            &message(Channel::Command, r#"{"type":"beginshopping"}"#),
        );
        assert!(matches!(events[0], EventPayload::SessionStarted { .. }));
        assert!(engine.state().is_active());
    }

    #[test]
    fn test_end_command_closes_session() {
        let mut engine = SessionEngine::new(StoreConfig::default());
        handle_gateway_message(
            &mut engine,
            &message(Channel::Command, r#"{"type":"beginshopping"}"#),
        );
        let events = handle_gateway_message(
            &mut engine,
            &message(Channel::Command, r#"{"type":"endshopping"}"#),
        );
        assert!(matches!(events[0], EventPayload::SessionEnded { .. }));
        assert!(!engine.state().is_active());
    }

    #[test]
    fn test_pairing_message_yields_response() {
        let mut engine = SessionEngine::new(StoreConfig::default());
        let events = handle_gateway_message(
            &mut engine,
            &message(
                Channel::Inbound,
                r#"{"type":"personidentified","data":{"pairingId":"p1","areaId":"a1"}}"#,
            ),
        );
        assert!(matches!(
            &events[0],
            EventPayload::PersonPaired { pairing_id, area_id, .. }
                if pairing_id == "p1" && area_id == "a1"
        ));
    }

    #[test]
    fn test_undecodable_messages_produce_nothing() {
        let mut engine = SessionEngine::new(StoreConfig::default());
        assert!(handle_gateway_message(
            &mut engine,
            &message(Channel::Inbound, "garbage")
        )
        .is_empty());
        assert!(handle_gateway_message(
            &mut engine,
            &message(Channel::Command, r#"{"type":"restock"}"#)
        )
        .is_empty());
    }
}
