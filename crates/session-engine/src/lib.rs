//! Shopping Session Decision Core
//!
//! Consumes per-frame prediction batches and decides when to emit
//! higher-level domain events:
//! - Session start/end (external commands, sustained-absence auto end)
//! - Item detections (per-class cumulative threshold, once per session)
//! - Pairing responses
//!
//! Bounded memory, no replay, no look-ahead; each event fires at most once
//! per session.

pub mod aggregator;
pub mod config;
pub mod state;

pub use aggregator::DetectionAggregator;
pub use config::StoreConfig;
pub use state::{Session, SessionState};

use detection::Prediction;
use event_protocol::{EventPayload, PersonRef};
use presence_window::PresenceWindow;
use tracing::{debug, info};

/// Session decision engine
///
/// Owns the session identity and both trackers. Callers feed it one frame
/// or one inbound message at a time; it returns the outbound events the
/// input produced, in emission order.
pub struct SessionEngine {
    config: StoreConfig,
    aggregator: DetectionAggregator,
    presence: PresenceWindow,
    state: SessionState,
}

impl SessionEngine {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            aggregator: DetectionAggregator::new(config.object_detection_threshold),
            presence: PresenceWindow::new(config.person_threshold),
            state: SessionState::Idle,
            config,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active session, if any
    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    /// Open a shopping session.
    ///
    /// If a session is already active it is force-closed first: its end
    /// event is emitted and both trackers reset, so no detection or
    /// presence state leaks into the new session.
    pub fn begin_session(&mut self) -> Vec<EventPayload> {
        let mut events = Vec::new();

        if let SessionState::Active(session) = self.state {
            info!(
                session_id = %session.session_id,
                "begin while active: force-closing current session"
            );
            events.push(self.close_session(session));
        }

        let session = Session::generate();
        // Fresh session must not inherit stale absence history
        self.presence.reset();
        self.state = SessionState::Active(session);
        info!(
            person_id = %session.person_id,
            session_id = %session.session_id,
            "session started"
        );
        events.push(EventPayload::SessionStarted {
            person_id: session.person_id,
            session_id: session.session_id,
        });
        events
    }

    /// Close the active session regardless of presence-window state.
    /// A no-op when idle.
    pub fn end_session(&mut self) -> Vec<EventPayload> {
        match self.state {
            SessionState::Idle => {
                debug!("end command while idle, ignoring");
                Vec::new()
            }
            SessionState::Active(session) => vec![self.close_session(session)],
        }
    }

    /// Process one frame's prediction batch.
    ///
    /// While idle, frames are dropped: nothing accumulates outside a
    /// session. While active, person sightings feed only the presence
    /// window and every other prediction feeds the aggregator; one item
    /// event fires per newly-crossed label, and sustained absence closes
    /// the session. An empty batch counts as "person absent".
    pub fn observe_frame(&mut self, predictions: &[Prediction]) -> Vec<EventPayload> {
        let session = match self.state {
            SessionState::Idle => return Vec::new(),
            SessionState::Active(session) => session,
        };

        let person_present = predictions.iter().any(Prediction::is_person);

        let crossed = self
            .aggregator
            .observe(predictions.iter().filter(|p| !p.is_person()).map(|p| p.class.as_str()));

        let mut events: Vec<EventPayload> = crossed
            .into_iter()
            .map(|item| {
                info!(%item, session_id = %session.session_id, "item detected");
                EventPayload::ItemsDetected {
                    person_id: session.person_id,
                    session_id: session.session_id,
                    item,
                }
            })
            .collect();

        if self.presence.record_and_evaluate(person_present) {
            info!(
                session_id = %session.session_id,
                absent_frames = self.presence.capacity(),
                "sustained absence: ending session"
            );
            events.push(self.close_session(session));
        }

        events
    }

    /// Respond to an inbound pairing request. Valid in any state; with no
    /// active session the response carries a person entry without ids.
    pub fn handle_pairing(&self, pairing_id: String, area_id: String) -> EventPayload {
        let session = self.state.session();
        EventPayload::PersonPaired {
            pairing_id,
            area_id,
            persons: vec![PersonRef {
                person_id: session.map(|s| s.person_id),
                session_id: session.map(|s| s.session_id),
            }],
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn close_session(&mut self, session: Session) -> EventPayload {
        self.aggregator.reset();
        self.presence.reset();
        self.state = SessionState::Idle;
        info!(
            person_id = %session.person_id,
            session_id = %session.session_id,
            "session ended"
        );
        EventPayload::SessionEnded {
            person_id: session.person_id,
            session_id: session.session_id,
        }
    }
}
