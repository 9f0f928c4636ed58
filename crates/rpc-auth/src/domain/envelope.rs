//! # `AuthEnvelope`
//!
//! The minimum arguments every authenticated RPC call carries. Argument types
//! for individual RPCs embed an `AuthEnvelope` field rather than duplicating
//! the token and request time.
//!
//! ## Validation Order
//!
//! 1. **Token Check**: reject tokens the external verifier does not know
//! 2. **Time Check**: reject request times outside the skew window
//!
//! The token check always runs first, so `InvalidToken` masks a simultaneous
//! `TimeMismatch`.

use crate::domain::errors::AuthError;
use crate::domain::skew::SkewPolicy;
use crate::ports::outbound::{Clock, TokenVerifier};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Token and request time attached to every authenticated RPC argument.
///
/// Both fields must be set by the caller right before transmission. The
/// envelope is built per call and never reused across calls.
///
/// `Default` yields an unset envelope: empty token, request time at the Unix
/// epoch. Neither passes validation.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEnvelope {
    /// Authentication token verified by the server on every call.
    pub auth_token: String,

    /// Caller's clock at send time. Checked against the server clock so that
    /// a leaked token is only useful within the skew window.
    pub request_time: DateTime<Utc>,
}

impl AuthEnvelope {
    /// Creates an envelope with both fields populated.
    pub fn new<Tz: TimeZone>(auth_token: impl Into<String>, request_time: DateTime<Tz>) -> Self {
        Self {
            auth_token: auth_token.into(),
            request_time: request_time.with_timezone(&Utc),
        }
    }

    /// Sets the token. No validation happens here.
    pub fn set_auth_token(&mut self, auth_token: impl Into<String>) {
        self.auth_token = auth_token.into();
    }

    /// Sets the request time, normalized to UTC. No validation happens here.
    pub fn set_request_time<Tz: TimeZone>(&mut self, request_time: DateTime<Tz>) {
        self.request_time = request_time.with_timezone(&Utc);
    }

    /// Validates the envelope.
    ///
    /// Idempotent and side-effect free apart from the verifier lookup and a
    /// clock read.
    ///
    /// # Errors
    /// * `AuthError::InvalidToken` - the verifier rejected the token
    /// * `AuthError::TimeMismatch` - request time is outside the skew window
    pub fn is_authenticated<V, C>(
        &self,
        verifier: &V,
        policy: &SkewPolicy,
        clock: &C,
    ) -> Result<(), AuthError>
    where
        V: TokenVerifier + ?Sized,
        C: Clock + ?Sized,
    {
        if !verifier.is_token_valid(&self.auth_token) {
            return Err(AuthError::InvalidToken);
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

impl std::fmt::Debug for AuthEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEnvelope")
            .field("auth_token", &"<redacted>")
            .field("request_time", &self.request_time)
            .finish()
    }
}

/// Minimum reply embedded in every authenticated RPC reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthReply {}

/// Argument types that carry an [`AuthEnvelope`].
///
/// Lets the calling side stamp any authenticated argument generically and
/// the serving side validate it before dispatch.
pub trait AuthenticatedArgs {
    /// The embedded envelope.
    fn auth(&self) -> &AuthEnvelope;

    /// Mutable access to the embedded envelope.
    fn auth_mut(&mut self) -> &mut AuthEnvelope;

    /// Sets the token on the embedded envelope.
    fn set_auth_token(&mut self, auth_token: String) {
        self.auth_mut().set_auth_token(auth_token);
    }

    /// Sets the request time on the embedded envelope.
    fn set_request_time(&mut self, request_time: DateTime<Utc>) {
        self.auth_mut().set_request_time(request_time);
    }

    /// Validates the embedded envelope.
    ///
    /// # Errors
    /// See [`AuthEnvelope::is_authenticated`].
    fn is_authenticated<V, C>(&self, verifier: &V, policy: &SkewPolicy, clock: &C) -> Result<(), AuthError>
    where
        V: TokenVerifier + ?Sized,
        C: Clock + ?Sized,
    {
        self.auth().is_authenticated(verifier, policy, clock)
    }
}

impl AuthenticatedArgs for AuthEnvelope {
    fn auth(&self) -> &AuthEnvelope {
        self
    }

    fn auth_mut(&mut self) -> &mut AuthEnvelope {
        self
    }
}
