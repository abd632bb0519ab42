//! # dashboard-bridge
//!
//! Client-side notification bridge between the CI dashboard and the
//! server's job event channel.
//!
//! The bridge owns a single persistent WebSocket connection. It resolves
//! the channel endpoint from the page location the dashboard was served
//! from, authenticates with the `token` cookie on connect, re-broadcasts
//! the server's `notify:jobs` events on a local event bus, and exposes
//! one outbound command for watching a project's jobs. Reconnection,
//! framing, and server-side concerns are deliberately left to the
//! transport and the server.
//!
//! ## Architecture
//!
//! ```text
//! Page location + cookies (config/)
//!     │
//!     ├── Endpoint resolver (endpoint/)
//!     ├── Token reader (auth/)
//!     │
//!     ├── JobsBridge + connection loop (ws/)
//!     ├── EventBus (domain/)
//!     │
//!     └── UI subscribers (out of scope)
//! ```

pub mod auth;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod ws;
