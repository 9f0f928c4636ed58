//! # `LockCallEnvelope`
//!
//! Arguments for distributed-lock RPCs: an [`AuthEnvelope`] plus the lock
//! subsystem's own arguments, which this crate never inspects.
//!
//! The envelope is a gate in front of the payload, not a data dependency of
//! it. [`LockCallEnvelope::into_authenticated`] is the only way to take the
//! payload out on the serving side, and it validates first.

use crate::domain::envelope::{AuthEnvelope, AuthenticatedArgs};
use crate::domain::errors::AuthError;
use crate::domain::skew::SkewPolicy;
use crate::ports::outbound::{Clock, TokenVerifier};
use serde::{Deserialize, Serialize};

/// Authenticated argument type for lock RPCs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockCallEnvelope<L> {
    auth: AuthEnvelope,
    lock_args: L,
}

impl<L> LockCallEnvelope<L> {
    /// Wraps `lock_args` with an unset envelope.
    ///
    /// The caller must set the token and request time before transmission.
    pub fn wrap(lock_args: L) -> Self {
        Self {
            auth: AuthEnvelope::default(),
            lock_args,
        }
    }

    /// Read-only view of the lock payload.
    pub fn lock_args(&self) -> &L {
        &self.lock_args
    }

    /// Validates the embedded envelope, then releases the payload.
    ///
    /// On failure the payload is dropped and never reaches the caller.
    ///
    /// # Errors
    /// See [`AuthEnvelope::is_authenticated`].
    pub fn into_authenticated<V, C>(
        self,
        verifier: &V,
        policy: &SkewPolicy,
        clock: &C,
    ) -> Result<L, AuthError>
    where
        V: TokenVerifier + ?Sized,
        C: Clock + ?Sized,
    {
        self.auth.is_authenticated(verifier, policy, clock)?;
        Ok(self.lock_args)
    }
}

impl<L> AuthenticatedArgs for LockCallEnvelope<L> {
    fn auth(&self) -> &AuthEnvelope {
        &self.auth
    }

    fn auth_mut(&mut self) -> &mut AuthEnvelope {
        &mut self.auth
    }
}
