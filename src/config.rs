//! Bridge configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The page URL stands in for the
//! browser location the dashboard was served from.

use crate::domain::ProjectId;
use crate::endpoint::{Endpoint, PageLocation};
use crate::error::BridgeError;

/// Top-level bridge configuration.
///
/// Loaded once at startup via [`BridgeConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Location the dashboard page was served from.
    pub location: PageLocation,

    /// Fixed endpoint override, e.g. the development endpoint
    /// `ws://localhost:3000`. When set it replaces the scheme and host
    /// derived from the page location; the resolved channel path is kept.
    pub endpoint_override: Option<String>,

    /// Initial cookie string for the cookie store.
    pub cookies: String,

    /// Capacity of the event bus broadcast channel.
    pub event_bus_capacity: usize,

    /// Project whose job notifications the watcher binary listens to.
    pub watch_project: Option<ProjectId>,
}

impl BridgeConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPageUrl`] if `DASHBOARD_PAGE_URL` is
    /// set but cannot be parsed as an absolute URL.
    pub fn from_env() -> Result<Self, BridgeError> {
        dotenvy::dotenv().ok();

        let page_url = std::env::var("DASHBOARD_PAGE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/dashboard".to_string());
        let location = PageLocation::parse(&page_url)?;

        let endpoint_override = std::env::var("DASHBOARD_ENDPOINT").ok();
        let cookies = std::env::var("DASHBOARD_COOKIES").unwrap_or_default();
        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 256);
        let watch_project = std::env::var("WATCH_PROJECT_ID")
            .ok()
            .and_then(|v| v.parse().ok());

        Ok(Self {
            location,
            endpoint_override,
            cookies,
            event_bus_capacity,
            watch_project,
        })
    }

    /// Composes the channel URL to connect to.
    ///
    /// The channel path is always resolved from the page location; the
    /// scheme and host come from the override when one is configured.
    #[must_use]
    pub fn channel_url(&self) -> String {
        let endpoint = Endpoint::resolve(&self.location);
        match &self.endpoint_override {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), endpoint.path),
            None => endpoint.url(),
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn config(secure: bool, path: &str, endpoint_override: Option<&str>) -> BridgeConfig {
        BridgeConfig {
            location: PageLocation {
                secure,
                host: "ci.example.com".to_string(),
                path: path.to_string(),
            },
            endpoint_override: endpoint_override.map(ToString::to_string),
            cookies: String::new(),
            event_bus_capacity: 16,
            watch_project: None,
        }
    }

    #[test]
    fn channel_url_derives_from_the_page_location() {
        let config = config(true, "/infra/dashboard/jobs", None);
        assert_eq!(config.channel_url(), "wss://ci.example.com/infra/socket.io/");
    }

    #[test]
    fn override_replaces_scheme_and_host_but_keeps_the_path() {
        let config = config(true, "/infra/dashboard", Some("ws://localhost:3000"));
        assert_eq!(config.channel_url(), "ws://localhost:3000/infra/socket.io/");
    }

    #[test]
    fn override_trailing_slash_does_not_double_up() {
        let config = config(false, "/dashboard", Some("ws://localhost:3000/"));
        assert_eq!(config.channel_url(), "ws://localhost:3000/socket.io/");
    }
}
