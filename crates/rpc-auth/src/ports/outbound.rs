//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities this subsystem needs but does not own: token verification and
//! issuance, credential checks, a UTC clock, and the lock subsystem that
//! consumes authenticated lock payloads.
//!
//! All ports must be `Send + Sync`; many calls are validated concurrently.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Source of "now" for skew checks.
///
/// Must be monotonic enough that two reads microseconds apart agree. It does
/// not need to be synchronized with other nodes.
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// External predicate deciding whether a presented token is genuine.
///
/// Assumed to be a read-only lookup: calling it twice with the same token must
/// give the same answer.
pub trait TokenVerifier: Send + Sync {
    /// Returns `true` if `token` was issued by the credential store.
    fn is_token_valid(&self, token: &str) -> bool;
}

/// Error from token issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenIssuerError {
    /// The issuer is not able to mint tokens right now.
    #[error("Token issuer unavailable: {0}")]
    Unavailable(String),

    /// The issuer refused to mint a token for this user.
    #[error("Token issuance refused for {username}")]
    Refused { username: String },
}

/// External token issuer, invoked after a login passed every check.
pub trait TokenIssuer: Send + Sync {
    /// Mint a fresh token for `username`.
    ///
    /// # Errors
    /// * `TokenIssuerError::Unavailable` - backing store cannot mint tokens
    /// * `TokenIssuerError::Refused` - user is not allowed a token
    fn issue_token(&self, username: &str) -> Result<String, TokenIssuerError>;
}

/// External username/password check used during login.
pub trait CredentialVerifier: Send + Sync {
    /// Returns `true` if the pair is known to the credential store.
    fn verify_credentials(&self, username: &str, password: &str) -> bool;
}

/// Error from the lock subsystem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LockGatewayError {
    /// The lock subsystem rejected the request.
    #[error("Lock request rejected: {reason}")]
    Rejected { reason: String },

    /// Communication error
    #[error("Communication error: {0}")]
    CommunicationError(String),
}

/// Gateway to the distributed-lock subsystem.
///
/// The payload type `L` is owned and interpreted entirely by the lock
/// subsystem. Implementations only ever receive payloads whose envelope has
/// already been authenticated.
pub trait LockGateway<L>: Send + Sync {
    /// Reply produced by the lock subsystem (e.g. "lock granted").
    type Reply;

    /// Hand an authenticated lock payload to the lock subsystem.
    ///
    /// # Errors
    /// * `LockGatewayError::Rejected` - the lock subsystem refused the request
    /// * `LockGatewayError::CommunicationError` - the subsystem is unreachable
    fn handle(&self, lock_args: L) -> Result<Self::Reply, LockGatewayError>;
}
