//! Broadcast channel for locally-observable bridge events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. The bridge
//! publishes a [`JobsNotification`] for every `notify:jobs` event the
//! server pushes; any number of UI tasks hold receivers and react
//! independently, in subscription order per event.
//!
//! The bus is an explicit, injectable instance: consumers obtain a handle
//! at startup instead of reaching through a process-wide global.

use tokio::sync::broadcast;

use super::JobsNotification;

/// Default capacity of the broadcast ring buffer.
pub const DEFAULT_CAPACITY: usize = 256;

/// Broadcast bus for [`JobsNotification`]s.
///
/// When the ring buffer is full, the oldest events are dropped for
/// lagging receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<JobsNotification>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes a notification to all subscribers.
    ///
    /// Returns the number of receivers that got the event. With no active
    /// receivers the event is silently dropped.
    pub fn publish(&self, notification: JobsNotification) -> usize {
        self.sender.send(notification).unwrap_or(0)
    }

    /// Creates a new receiver for all future notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<JobsNotification> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
