//! Bounded presence window implementation

use std::collections::VecDeque;

/// Default capacity (frames of sustained absence before a session ends)
pub const DEFAULT_CAPACITY: usize = 100;

/// Sliding window of the most recent person-presence observations.
///
/// Strict FIFO of fixed capacity: push-append on the right, evict the
/// oldest entry on overflow. Length never exceeds the configured capacity.
#[derive(Debug, Clone)]
pub struct PresenceWindow {
    window: VecDeque<bool>,
    capacity: usize,
}

impl PresenceWindow {
    /// Create a window with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record one frame's observation and evaluate the end condition.
    ///
    /// Returns true iff the window has reached full capacity and no entry
    /// in it saw a person. A window shorter than capacity never triggers,
    /// even if every observed entry so far is false; a fresh session cannot
    /// be ended before `capacity` frames have been seen.
    pub fn record_and_evaluate(&mut self, present: bool) -> bool {
        if self.window.len() >= self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(present);

        self.is_full() && self.window.iter().all(|&p| !p)
    }

    /// Number of observations currently held
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether no observations have been recorded yet
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Whether the window holds exactly `capacity` observations
    pub fn is_full(&self) -> bool {
        self.window.len() == self.capacity
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all observations (session start and session end)
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

impl Default for PresenceWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_window_never_triggers() {
        let mut window = PresenceWindow::new(100);

        // 99 absent frames: below capacity, must not trigger
        for _ in 0..99 {
            assert!(!window.record_and_evaluate(false));
        }
        assert_eq!(window.len(), 99);

        // 100th absent frame fills the window and triggers
        assert!(window.record_and_evaluate(false));
        assert_eq!(window.len(), 100);
    }

    #[test]
    fn test_fifo_eviction_keeps_length_at_capacity() {
        let mut window = PresenceWindow::new(100);

        // One presence observation, then fill with absences
        window.record_and_evaluate(true);
        for _ in 0..99 {
            window.record_and_evaluate(false);
        }
        assert!(window.is_full());

        // 101st push evicts the oldest (the sole `true`); length stays at
        // capacity and the all-absent condition now holds
        assert!(window.record_and_evaluate(false));
        assert_eq!(window.len(), 100);
    }

    #[test]
    fn test_recent_presence_blocks_end() {
        let mut window = PresenceWindow::new(10);

        for _ in 0..9 {
            window.record_and_evaluate(false);
        }
        // Person seen on the frame that fills the window
        assert!(!window.record_and_evaluate(true));

        // That observation lingers for 9 more absent frames
        for _ in 0..9 {
            assert!(!window.record_and_evaluate(false));
        }
        // Evicted on the 10th: sustained absence confirmed
        assert!(window.record_and_evaluate(false));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut window = PresenceWindow::new(5);
        for _ in 0..5 {
            window.record_and_evaluate(false);
        }
        assert!(window.is_full());

        window.reset();
        assert!(window.is_empty());

        // Stale absence history must not carry into a fresh session
        for _ in 0..4 {
            assert!(!window.record_and_evaluate(false));
        }
        assert!(window.record_and_evaluate(false));
    }
}
