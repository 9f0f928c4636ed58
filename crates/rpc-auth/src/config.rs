//! # Authentication Configuration
//!
//! Immutable values injected into every validation: the skew window and the
//! server's own version string.
//!
//! ## Environment Overrides
//!
//! - `RPC_AUTH_SKEW_WINDOW_SECS`: skew window in whole seconds
//! - `RPC_AUTH_SERVER_VERSION`: version string compared at login

use crate::domain::skew::{SkewPolicy, DEFAULT_SKEW_WINDOW};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Env var overriding the skew window.
pub const ENV_SKEW_WINDOW_SECS: &str = "RPC_AUTH_SKEW_WINDOW_SECS";

/// Env var overriding the server version.
pub const ENV_SERVER_VERSION: &str = "RPC_AUTH_SERVER_VERSION";

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero window rejects every request from a node with any clock drift.
    #[error("Skew window must be greater than zero")]
    ZeroSkewWindow,

    /// Login would accept only clients that also claim an empty version.
    #[error("Server version must not be empty")]
    EmptyServerVersion,
}

/// Authentication configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Maximum tolerated difference between request time and server time.
    pub skew_window: Duration,
    /// This server's build/protocol version.
    pub server_version: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            skew_window: DEFAULT_SKEW_WINDOW,
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AuthConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Malformed values are ignored with a
    /// warning and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SKEW_WINDOW_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => {
                    config.skew_window = Duration::from_secs(secs);
                    info!(skew_window_secs = secs, "Loaded skew window from environment");
                }
                Err(_) => warn!(value = %raw, "{ENV_SKEW_WINDOW_SECS} must be a whole number of seconds"),
            }
        }

        if let Some(version) = lookup(ENV_SERVER_VERSION) {
            info!(server_version = %version, "Loaded server version from environment");
            config.server_version = version;
        }

        config
    }

    /// Reject configurations that would lock every client out.
    ///
    /// # Errors
    /// * `ConfigError::ZeroSkewWindow`
    /// * `ConfigError::EmptyServerVersion`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.skew_window.is_zero() {
            return Err(ConfigError::ZeroSkewWindow);
        }
        if self.server_version.is_empty() {
            return Err(ConfigError::EmptyServerVersion);
        }
        Ok(())
    }

    /// Skew policy built from this configuration.
    pub fn skew_policy(&self) -> SkewPolicy {
        SkewPolicy::new(self.skew_window)
    }
}
