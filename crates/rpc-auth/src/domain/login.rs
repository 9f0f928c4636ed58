//! # Login Handshake
//!
//! The one-time exchange of credentials for a token. There is no token yet at
//! login time, so the credential carries a username/password pair where the
//! envelope would carry a token.
//!
//! ## Validation Order
//!
//! 1. **Version Check**: client version must equal the server version byte for byte
//! 2. **Time Check**: request time must be inside the skew window
//!
//! Username/password correctness is checked afterwards by the external
//! credential store (see `RpcAuthService::login`).

use crate::domain::errors::AuthError;
use crate::domain::skew::SkewPolicy;
use crate::ports::outbound::Clock;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Login arguments sent by a client that does not hold a token yet.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredential {
    pub username: String,
    pub password: String,
    /// Client build/protocol version.
    pub version: String,
    pub request_time: DateTime<Utc>,
}

impl LoginCredential {
    pub fn new<Tz: TimeZone>(
        username: impl Into<String>,
        password: impl Into<String>,
        version: impl Into<String>,
        request_time: DateTime<Tz>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            version: version.into(),
            request_time: request_time.with_timezone(&Utc),
        }
    }

    /// Structural validation of the login request.
    ///
    /// # Errors
    /// * `AuthError::VersionMismatch` - `version` differs from `server_version`
    /// * `AuthError::TimeMismatch` - request time is outside the skew window
    pub fn is_valid<C>(&self, server_version: &str, policy: &SkewPolicy, clock: &C) -> Result<(), AuthError>
    where
        C: Clock + ?Sized,
    {
        if self.version != server_version {
            return Err(AuthError::VersionMismatch {
                client: self.version.clone(),
                server: server_version.to_string(),
            });
        }

        let server_time = clock.now_utc();
        if !policy.is_allowed_at(&self.request_time, server_time) {
            return Err(AuthError::TimeMismatch {
                request_time: self.request_time,
                server_time,
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for LoginCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("version", &self.version)
            .field("request_time", &self.request_time)
            .finish()
    }
}

/// Login reply carrying the freshly issued token.
///
/// Ownership of the token passes entirely to the caller, who stamps it onto
/// every subsequent [`AuthEnvelope`](crate::domain::envelope::AuthEnvelope).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub auth_token: String,
}

impl LoginResult {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
        }
    }

    /// Consumes the reply, yielding the token.
    pub fn into_token(self) -> String {
        self.auth_token
    }
}

impl std::fmt::Debug for LoginResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResult")
            .field("auth_token", &"<redacted>")
            .finish()
    }
}
