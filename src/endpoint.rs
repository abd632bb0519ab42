//! Channel endpoint resolution from the dashboard's page location.
//!
//! The dashboard may be mounted anywhere in a site's URL space
//! (e.g. `https://ci.example.com/infra/dashboard/jobs`). The notification
//! channel is served next to the mount point, so the channel path is the
//! page path up to the mount marker with a fixed suffix appended.

use url::Url;

use crate::error::BridgeError;

/// Path segment identifying where the dashboard application is served from.
pub const MOUNT_MARKER: &str = "/dashboard";

/// Fixed channel sub-path, appended to the mount prefix.
pub const CHANNEL_SUFFIX: &str = "/socket.io/";

/// The location the dashboard page was served from.
///
/// Native stand-in for the browser page location; captured once at startup
/// from configuration and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Whether the page was loaded over a secure transport (`https`).
    pub secure: bool,
    /// Host, including the port when one is present (e.g. `ci.example.com:8080`).
    pub host: String,
    /// Full page path (e.g. `/infra/dashboard/jobs`).
    pub path: String,
}

impl PageLocation {
    /// Parses a page URL into its location parts.
    ///
    /// Any scheme other than `https` counts as insecure.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPageUrl`] if `page_url` is not a
    /// parsable absolute URL.
    pub fn parse(page_url: &str) -> Result<Self, BridgeError> {
        let url = Url::parse(page_url)?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };
        Ok(Self {
            secure: url.scheme() == "https",
            host,
            path: url.path().to_string(),
        })
    }
}

/// Resolved notification channel endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Whether to connect over `wss` (mirrors the page scheme).
    pub secure: bool,
    /// Host (and port) to connect to.
    pub host: String,
    /// Channel path, always ending in [`CHANNEL_SUFFIX`].
    pub path: String,
}

impl Endpoint {
    /// Resolves the channel endpoint for a page location.
    ///
    /// The channel path is the page path up to (not including) the
    /// [`MOUNT_MARKER`], with [`CHANNEL_SUFFIX`] appended. A path without
    /// the marker degrades to the whole path as the prefix.
    #[must_use]
    pub fn resolve(location: &PageLocation) -> Self {
        let prefix = match location.path.find(MOUNT_MARKER) {
            Some(idx) => location.path.get(..idx).unwrap_or(&location.path),
            None => location.path.as_str(),
        };
        Self {
            secure: location.secure,
            host: location.host.clone(),
            path: format!("{prefix}{CHANNEL_SUFFIX}"),
        }
    }

    /// Returns the scheme-and-host part of the channel URL.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{}", self.host)
    }

    /// Returns the full channel URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url(), self.path)
    }
}
