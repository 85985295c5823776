//! Event Protocol
//!
//! The wire contract between the store agent and its paired system:
//! - Outbound envelopes (id/ackId/time/storeId + typed payload)
//! - Inbound message decoding (pairing requests)
//! - Command decoding (begin/end shopping)
//!
//! Payload shape is enforced at construction: each outbound event type is a
//! tagged variant, never an untyped object. Inbound text that fails to
//! parse, or carries an unknown `type`, is dropped silently.

mod command;
mod envelope;

pub use command::{decode_command, Command};
pub use envelope::{decode_inbound, Envelope, EventPayload, InboundMessage, PersonRef};

use thiserror::Error;

/// Protocol error types
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Envelope encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
