//! Domain layer: project identity, the local notification event, and the
//! event bus that decouples the bridge from its UI consumers.

pub mod event_bus;
pub mod notification;
pub mod project;

pub use event_bus::EventBus;
pub use notification::JobsNotification;
pub use project::ProjectId;
