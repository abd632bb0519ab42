//! Channel layer: bridge handle, connection loop, and wire messages.
//!
//! The bridge owns one persistent WebSocket connection to the server's
//! notification channel and relays its events onto the local event bus.

pub mod bridge;
pub mod messages;

mod connection;
