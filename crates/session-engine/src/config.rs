//! Engine configuration

use serde::{Deserialize, Serialize};

/// Decision core configuration. Supplied at startup, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Cumulative sightings a class must exceed before an item event fires
    pub object_detection_threshold: u32,

    /// Presence window capacity: consecutive person-absent frames that end
    /// an active session
    pub person_threshold: usize,

    /// Static store identifier stamped on every outbound envelope
    pub store_id: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            object_detection_threshold: 10,
            person_threshold: 100,
            store_id: 9763,
        }
    }
}
