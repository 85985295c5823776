//! Presence Window
//!
//! Fixed-capacity FIFO of per-frame "person present" observations. Decides
//! when sustained absence should end a shopping session.

mod window;

pub use window::PresenceWindow;
