//! # RPC Authentication Service
//!
//! Application service layer that implements the `RpcAuthApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`RpcAuthApi`)
//! - Uses the outbound ports (`TokenVerifier`, `CredentialVerifier`,
//!   `TokenIssuer`, `Clock`) supplied by the credential store
//! - Delegates envelope and login checks to the domain layer

use crate::config::AuthConfig;
use crate::domain::envelope::AuthenticatedArgs;
use crate::domain::errors::AuthError;
use crate::domain::lock::LockCallEnvelope;
use crate::domain::login::{LoginCredential, LoginResult};
use crate::domain::skew::SkewPolicy;
use crate::ports::inbound::RpcAuthApi;
use crate::ports::outbound::{Clock, CredentialVerifier, LockGateway, TokenIssuer, TokenVerifier};
use tracing::{debug, info, warn};

/// RPC Authentication Service.
///
/// Holds no per-call state; one instance serves every inbound call.
pub struct RpcAuthService<V, I, P, C>
where
    V: TokenVerifier,
    I: TokenIssuer,
    P: CredentialVerifier,
    C: Clock,
{
    tokens: V,
    issuer: I,
    credentials: P,
    clock: C,
    policy: SkewPolicy,
    server_version: String,
}

impl<V, I, P, C> RpcAuthService<V, I, P, C>
where
    V: TokenVerifier,
    I: TokenIssuer,
    P: CredentialVerifier,
    C: Clock,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `config` - skew window and server version
    /// * `tokens` - token verifier
    /// * `issuer` - token issuer used after a successful login
    /// * `credentials` - username/password verifier
    /// * `clock` - source of "now"
    pub fn new(config: &AuthConfig, tokens: V, issuer: I, credentials: P, clock: C) -> Self {
        Self {
            tokens,
            issuer,
            credentials,
            clock,
            policy: config.skew_policy(),
            server_version: config.server_version.clone(),
        }
    }

    /// The skew policy applied to every call.
    pub fn policy(&self) -> &SkewPolicy {
        &self.policy
    }

    /// The version string logins must match.
    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<V, I, P, C> RpcAuthApi for RpcAuthService<V, I, P, C>
where
    V: TokenVerifier,
    I: TokenIssuer,
    P: CredentialVerifier,
    C: Clock,
{
    fn authenticate<A>(&self, args: &A) -> Result<(), AuthError>
    where
        A: AuthenticatedArgs + ?Sized,
    {
        match args.is_authenticated(&self.tokens, &self.policy, &self.clock) {
            Ok(()) => {
                debug!(request_time = %args.auth().request_time, "RPC envelope authenticated");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Rejected RPC envelope");
                Err(e)
            }
        }
    }

    fn login(&self, credential: &LoginCredential) -> Result<LoginResult, AuthError> {
        // 1. Version and skew
        if let Err(e) = credential.is_valid(&self.server_version, &self.policy, &self.clock) {
            warn!(username = %credential.username, error = %e, "Rejected login request");
            return Err(e);
        }

        // 2. Credential store
        if !self
            .credentials
            .verify_credentials(&credential.username, &credential.password)
        {
            warn!(username = %credential.username, "Login rejected by credential store");
            return Err(AuthError::AuthenticationFailed);
        }

        // 3. Token issuance
        let auth_token = self
            .issuer
            .issue_token(&credential.username)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;
        if auth_token.is_empty() {
            return Err(AuthError::TokenIssuance("issuer returned an empty token".to_string()));
        }

        info!(username = %credential.username, "Login succeeded");
        Ok(LoginResult::new(auth_token))
    }

    fn dispatch_lock_call<L, G>(
        &self,
        envelope: LockCallEnvelope<L>,
        gateway: &G,
    ) -> Result<G::Reply, AuthError>
    where
        G: LockGateway<L> + ?Sized,
    {
        // Authentication must short-circuit before the lock subsystem sees anything.
        let lock_args = match envelope.into_authenticated(&self.tokens, &self.policy, &self.clock) {
            Ok(lock_args) => lock_args,
            Err(e) => {
                warn!(error = %e, "Rejected lock call envelope");
                return Err(e);
            }
        };

        gateway.handle(lock_args).map_err(|e| {
            warn!(error = %e, "Lock subsystem refused authenticated call");
            AuthError::LockDispatch(e.to_string())
        })
    }
}
