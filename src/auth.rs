//! Auth token lookup from the dashboard's cookie string.
//!
//! The channel is authenticated with the value of the `token` cookie.
//! Cookie parsing is a linear scan over `;`-separated `key=value` pairs,
//! not a full cookie-grammar parser: values containing `;` or `=` are not
//! specially handled.

use std::sync::RwLock;

/// Name of the cookie holding the auth token.
pub const TOKEN_COOKIE: &str = "token";

/// Returns the value of the first cookie named `name`.
///
/// Pairs are scanned in order, leading spaces on keys are trimmed, and the
/// first exact key match wins. Returns `None` when no pair matches.
#[must_use]
pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    for pair in cookies.split(';') {
        let pair = pair.trim_start_matches(' ');
        if let Some((key, value)) = pair.split_once('=')
            && key == name
        {
            return Some(value);
        }
    }
    None
}

/// Returns the current auth token, or `""` when the cookie is absent.
#[must_use]
pub fn token_from_cookies(cookies: &str) -> &str {
    cookie_value(cookies, TOKEN_COOKIE).unwrap_or("")
}

/// Source of the auth token sent during the channel handshake.
///
/// The bridge re-reads the token on every connection-established event
/// rather than caching it at construction time, so implementations must
/// return the *current* value.
pub trait TokenSource: Send + Sync + 'static {
    /// Returns the current token; empty when none is available.
    fn token(&self) -> String;
}

/// Shared holder of the raw cookie string.
///
/// Native stand-in for the browser cookie store. The hosting application
/// may replace the string at any time (e.g. after a login refresh); the
/// bridge sees the new token on its next connect.
#[derive(Debug, Default)]
pub struct CookieStore {
    cookies: RwLock<String>,
}

impl CookieStore {
    /// Creates a store holding `cookies`.
    #[must_use]
    pub fn new(cookies: impl Into<String>) -> Self {
        Self {
            cookies: RwLock::new(cookies.into()),
        }
    }

    /// Replaces the stored cookie string.
    pub fn set(&self, cookies: impl Into<String>) {
        let replacement = cookies.into();
        match self.cookies.write() {
            Ok(mut guard) => *guard = replacement,
            Err(poisoned) => *poisoned.into_inner() = replacement,
        }
    }

    /// Returns a copy of the stored cookie string.
    #[must_use]
    pub fn cookies(&self) -> String {
        match self.cookies.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TokenSource for CookieStore {
    fn token(&self) -> String {
        token_from_cookies(&self.cookies()).to_string()
    }
}
