//! External shopping commands
//!
//! Begin/end triggers arrive on the command channel as small typed
//! messages. Their origin (operator UI, turnstile, external signal) is not
//! this crate's concern.

use tracing::debug;

/// Session lifecycle command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open a shopping session
    BeginShopping,
    /// Close the active shopping session
    EndShopping,
}

/// Decode command text, or `None` if it should be dropped.
///
/// Same drop-on-unknown policy as inbound event decoding.
pub fn decode_command(text: &str) -> Option<Command> {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            debug!("dropping unparseable command: {err}");
            return None;
        }
    };

    match value.get("type").and_then(|t| t.as_str()) {
        Some("beginshopping") => Some(Command::BeginShopping),
        Some("endshopping") => Some(Command::EndShopping),
        other => {
            debug!("ignoring command of type {other:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_commands() {
        assert_eq!(
            decode_command(r#"{"type":"beginshopping"}"#),
            Some(Command::BeginShopping)
        );
        assert_eq!(
            decode_command(r#"{"type":"endshopping"}"#),
            Some(Command::EndShopping)
        );
    }

    #[test]
    fn test_unknown_command_dropped() {
        assert_eq!(decode_command(r#"{"type":"pauseshopping"}"#), None);
        assert_eq!(decode_command("{}"), None);
        assert_eq!(decode_command("garbage"), None);
    }
}
