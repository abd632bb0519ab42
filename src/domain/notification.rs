//! The locally-observable job-change event.

use chrono::{DateTime, Utc};

/// Job-change notification relayed from the server.
///
/// The payload is exactly the value carried by the server's `notify:jobs`
/// event; the bridge never inspects or transforms it. Consumers decide
/// what, if anything, it means.
#[derive(Debug, Clone, PartialEq)]
pub struct JobsNotification {
    /// Opaque payload as received from the server.
    pub payload: serde_json::Value,
    /// When the bridge received the event.
    pub received_at: DateTime<Utc>,
}

impl JobsNotification {
    /// Wraps a raw payload, stamping the arrival time.
    #[must_use]
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            received_at: Utc::now(),
        }
    }
}
