//! # Calling Side
//!
//! `RequestStamper` keeps the token obtained at login and stamps it, together
//! with the current time, onto each outgoing authenticated argument right
//! before transmission.

use crate::domain::envelope::AuthenticatedArgs;
use crate::domain::login::{LoginCredential, LoginResult};
use crate::ports::outbound::Clock;

/// Builds login requests and stamps authenticated arguments.
pub struct RequestStamper<C: Clock> {
    clock: C,
    auth_token: Option<String>,
}

impl<C: Clock> RequestStamper<C> {
    /// A stamper with no token yet.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            auth_token: None,
        }
    }

    /// Login request stamped with the current time.
    pub fn login_request(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        version: impl Into<String>,
    ) -> LoginCredential {
        LoginCredential::new(username, password, version, self.clock.now_utc())
    }

    /// Stores the token from a successful login, replacing any previous one.
    pub fn accept_login(&mut self, result: LoginResult) {
        self.auth_token = Some(result.into_token());
    }

    /// Drops the stored token, e.g. after the server reported `InvalidToken`.
    pub fn clear(&mut self) {
        self.auth_token = None;
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Sets token and request time on `args`.
    ///
    /// Returns `false` and leaves `args` untouched when no login has
    /// happened yet.
    pub fn stamp<A>(&self, args: &mut A) -> bool
    where
        A: AuthenticatedArgs + ?Sized,
    {
        let Some(token) = &self.auth_token else {
            return false;
        };
        args.set_auth_token(token.clone());
        args.set_request_time(self.clock.now_utc());
        true
    }
}
