//! Outbound envelopes and inbound decoding

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::ProtocolError;

/// Person/session identifier pair carried in pairing responses.
///
/// Both ids are absent when no session is active — a degenerate but valid
/// pairing response, not an error. Absent ids are omitted from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

/// Type-specific payload of an outbound event.
///
/// Serialized adjacently tagged: `{"type": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EventPayload {
    /// A shopping session opened
    #[serde(rename = "sessionstarted", rename_all = "camelCase")]
    SessionStarted { person_id: Uuid, session_id: Uuid },

    /// A merchandise class crossed the detection threshold
    #[serde(rename = "itemsdetected", rename_all = "camelCase")]
    ItemsDetected {
        person_id: Uuid,
        session_id: Uuid,
        item: String,
    },

    /// The shopping session closed
    #[serde(rename = "sessionended", rename_all = "camelCase")]
    SessionEnded { person_id: Uuid, session_id: Uuid },

    /// Response to an inbound pairing request
    #[serde(rename = "personpaired", rename_all = "camelCase")]
    PersonPaired {
        pairing_id: String,
        area_id: String,
        persons: Vec<PersonRef>,
    },
}

impl EventPayload {
    /// Wire name of this event type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. } => "sessionstarted",
            Self::ItemsDetected { .. } => "itemsdetected",
            Self::SessionEnded { .. } => "sessionended",
            Self::PersonPaired { .. } => "personpaired",
        }
    }
}

/// Canonical outbound message wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Message identifier
    pub id: Uuid,
    /// Acknowledgement identifier
    pub ack_id: Uuid,
    /// Capture timestamp
    pub time: DateTime<Utc>,
    /// Static store identifier
    pub store_id: u32,
    /// Typed payload
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl Envelope {
    /// Wrap a payload with fresh message identifiers and the current time
    pub fn new(store_id: u32, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            ack_id: Uuid::new_v4(),
            time: Utc::now(),
            store_id,
            payload,
        }
    }

    /// Serialize to the wire representation
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Inbound message types the agent acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// External system identified the person in the store area
    PersonIdentified {
        pairing_id: String,
        area_id: String,
    },
}

/// Decode inbound text into a message, or `None` if it should be dropped.
///
/// Unparseable text, a missing `type`, an unknown `type`, or a known type
/// with a malformed payload all drop silently: no event is dispatched and
/// no error propagates.
pub fn decode_inbound(text: &str) -> Option<InboundMessage> {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            debug!("dropping unparseable inbound message: {err}");
            return None;
        }
    };

    let kind = match value.get("type").and_then(|t| t.as_str()) {
        Some(kind) => kind,
        None => {
            debug!("dropping inbound message without a type");
            return None;
        }
    };

    match kind {
        "personidentified" => {
            let data = value.get("data")?;
            let pairing_id = data.get("pairingId")?.as_str()?.to_string();
            let area_id = data.get("areaId")?.as_str()?.to_string();
            Some(InboundMessage::PersonIdentified {
                pairing_id,
                area_id,
            })
        }
        other => {
            debug!("ignoring inbound message of type {other:?}");
            None
        }
    }
}
