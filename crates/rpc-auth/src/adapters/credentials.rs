//! # Static Credential Store
//!
//! In-memory `CredentialVerifier` over a fixed username → password map, for
//! clusters where every node shares the same access/secret key pair.

use crate::ports::outbound::CredentialVerifier;
use std::collections::HashMap;
use subtle::ConstantTimeEq;

/// Fixed set of accepted username/password pairs.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding a single pair.
    pub fn single(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new().with_user(username, password)
    }

    /// Adds (or replaces) a user.
    #[must_use]
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.insert(username.into(), password.into());
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify_credentials(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(expected) => bool::from(expected.as_bytes().ct_eq(password.as_bytes())),
            None => false,
        }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}
