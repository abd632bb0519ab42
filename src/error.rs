//! Bridge error types.
//!
//! [`BridgeError`] covers the few failure modes the bridge owns:
//! configuration, the WebSocket transport, and wire encoding. A missing
//! cookie or a page path without the mount marker is not an error — both
//! degrade to defaults.

/// Central error type for the bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The configured page URL could not be parsed.
    #[error("invalid page url: {0}")]
    InvalidPageUrl(#[from] url::ParseError),

    /// Error propagated from the WebSocket transport.
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// An outbound command could not be encoded as JSON.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
