//! # Authentication Errors
//!
//! Every failure here is request-scoped and terminal. Retry policy, if any,
//! belongs to the RPC layer that called the validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by envelope, login and lock-call validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The presented token failed external verification.
    #[error("Invalid authentication token")]
    InvalidToken,

    /// The claimed request time is outside the skew window, in either direction.
    #[error("Request time {request_time} is outside the allowed skew of server time {server_time}")]
    TimeMismatch {
        request_time: DateTime<Utc>,
        server_time: DateTime<Utc>,
    },

    /// Login-time protocol version disagreement.
    #[error("Server version mismatch: client {client:?}, server {server:?}")]
    VersionMismatch { client: String, server: String },

    /// The external credential store rejected the username/password pair.
    #[error("Authentication failed: invalid username or password")]
    AuthenticationFailed,

    /// The external token issuer could not produce a token.
    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    /// The lock gateway refused an already authenticated payload.
    #[error("Lock dispatch failed: {0}")]
    LockDispatch(String),
}

impl AuthError {
    /// True for failures that mean "who you are" was not established.
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::AuthenticationFailed)
    }

    /// True when the caller's clock disagrees with ours.
    #[must_use]
    pub fn is_clock_skew(&self) -> bool {
        matches!(self, AuthError::TimeMismatch { .. })
    }

    /// True for client/server build incompatibility.
    #[must_use]
    pub fn is_compatibility_failure(&self) -> bool {
        matches!(self, AuthError::VersionMismatch { .. })
    }
}
