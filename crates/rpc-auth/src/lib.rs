//! # RPC Auth
//!
//! Authentication envelope shared by every inter-node RPC in the storage
//! cluster, the login handshake that issues the envelope's token, and the
//! argument envelope for distributed-lock RPCs.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Skew policy, envelope, login and lock-call validation
//! - **Ports Layer** (`ports/`): Inbound API and the credential store / clock / lock SPI
//! - **Adapters** (`adapters/`): HMAC token authority, static credentials, clocks
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Token First**: The token is checked before the request time, so an
//!   invalid token never reveals anything about clock skew
//! - **Symmetric Skew**: Requests too far in the future or the past are
//!   rejected identically (3 s by default, boundary inclusive)
//! - **Stateless**: No per-call state is kept; every check is repeatable
//! - **No Authorization**: What an authenticated caller may do is decided elsewhere

pub mod adapters;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use client::RequestStamper;
pub use config::{AuthConfig, ConfigError};
pub use domain::envelope::{AuthEnvelope, AuthReply, AuthenticatedArgs};
pub use domain::errors::AuthError;
pub use domain::lock::LockCallEnvelope;
pub use domain::login::{LoginCredential, LoginResult};
pub use domain::skew::{SkewPolicy, DEFAULT_SKEW_WINDOW};
pub use ports::inbound::RpcAuthApi;
pub use ports::outbound::{
    Clock, CredentialVerifier, LockGateway, LockGatewayError, TokenIssuer, TokenIssuerError,
    TokenVerifier,
};
pub use service::RpcAuthService;
