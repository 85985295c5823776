//! Session identity and lifecycle state

use uuid::Uuid;

/// Identity of one shopping session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub person_id: Uuid,
    pub session_id: Uuid,
}

impl Session {
    /// Mint a session with fresh identifiers
    pub fn generate() -> Self {
        Self {
            person_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
        }
    }
}

/// Lifecycle state. Exactly two states exist; only one session is tracked
/// at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No active session
    #[default]
    Idle,
    /// Session in progress
    Active(Session),
}

impl SessionState {
    /// The active session, if any
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Idle => None,
            Self::Active(session) => Some(session),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}
