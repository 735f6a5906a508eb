//! Client configuration.
//!
//! DESIGN
//! ======
//! The browser build has no process environment, so overrides are read at
//! compile time. `ACTIVITIES_API_BASE` points the client at a backend on a
//! different origin; when unset, requests go to the page's own origin.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

/// How long a signup outcome stays on screen.
pub const SIGNUP_STATUS_TTL: Duration = Duration::from_millis(5000);

/// How long a successful unregister stays on screen.
pub const UNREGISTER_STATUS_TTL: Duration = Duration::from_millis(4000);

/// Settings injected into the activity board at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    /// Prefix for every API path, without a trailing slash. Empty means same-origin.
    pub api_base: String,
    /// Display duration for signup success and rejection messages.
    pub signup_status_ttl: Duration,
    /// Display duration for unregister success messages.
    pub unregister_status_ttl: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            signup_status_ttl: SIGNUP_STATUS_TTL,
            unregister_status_ttl: UNREGISTER_STATUS_TTL,
        }
    }
}

impl BoardConfig {
    /// Build the config, honoring `ACTIVITIES_API_BASE` if it was set at build time.
    pub fn from_build_env() -> Self {
        Self::default().with_api_base(option_env!("ACTIVITIES_API_BASE").unwrap_or_default())
    }

    /// Replace the API base, trimming any trailing slashes.
    #[must_use]
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim().trim_end_matches('/').to_owned();
        self
    }
}
