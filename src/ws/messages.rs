//! Wire messages: named events exchanged over the notification channel.
//!
//! Each frame is a JSON envelope `{"event": <name>, "data": <payload>}`,
//! mirroring the named-event protocol of the server's channel library.

use serde::{Deserialize, Serialize};

use crate::domain::ProjectId;

/// Commands the bridge sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientCommand {
    /// Authenticate the channel. Sent once per established connection,
    /// carrying the auth token current at that moment (possibly empty).
    #[serde(rename = "auth")]
    Auth(String),

    /// Ask the server to start pushing job-change notifications scoped to
    /// a project.
    #[serde(rename = "listen:jobs")]
    ListenJobs(ProjectId),
}

/// Events the server pushes to the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// A project's jobs changed. The payload is opaque to the bridge and
    /// relayed to local subscribers unchanged.
    #[serde(rename = "notify:jobs")]
    NotifyJobs(serde_json::Value),
}
