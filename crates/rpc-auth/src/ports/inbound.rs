//! # Inbound Ports (Driving Ports / API)
//!
//! The checks an RPC server runs on every inbound call before acting on it.

use crate::domain::envelope::AuthenticatedArgs;
use crate::domain::errors::AuthError;
use crate::domain::lock::LockCallEnvelope;
use crate::domain::login::{LoginCredential, LoginResult};
use crate::ports::outbound::LockGateway;

/// Server-side authentication API.
///
/// Implementations must be thread-safe (`Send + Sync`); every call is
/// validated independently and nothing is shared between calls.
pub trait RpcAuthApi: Send + Sync {
    /// Validate the envelope embedded in any authenticated argument.
    ///
    /// # Errors
    /// * `AuthError::InvalidToken` - token rejected (checked first)
    /// * `AuthError::TimeMismatch` - request time outside the skew window
    fn authenticate<A>(&self, args: &A) -> Result<(), AuthError>
    where
        A: AuthenticatedArgs + ?Sized;

    /// Run the login handshake and issue a token.
    ///
    /// # Errors
    /// * `AuthError::VersionMismatch` - client build differs from ours
    /// * `AuthError::TimeMismatch` - request time outside the skew window
    /// * `AuthError::AuthenticationFailed` - credential store rejected the pair
    /// * `AuthError::TokenIssuance` - issuer failed or produced an empty token
    fn login(&self, credential: &LoginCredential) -> Result<LoginResult, AuthError>;

    /// Authenticate a lock call and hand its payload to the lock subsystem.
    ///
    /// The gateway is never invoked when authentication fails.
    ///
    /// # Errors
    /// * Any error of [`RpcAuthApi::authenticate`]
    /// * `AuthError::LockDispatch` - the gateway refused the payload
    fn dispatch_lock_call<L, G>(
        &self,
        envelope: LockCallEnvelope<L>,
        gateway: &G,
    ) -> Result<G::Reply, AuthError>
    where
        G: LockGateway<L> + ?Sized;
}
