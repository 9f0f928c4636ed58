//! # Adapters Module
//!
//! Reference implementations of the outbound ports: clocks, an HMAC token
//! authority and a static credential store.

pub mod clock;
pub mod credentials;
pub mod hmac_token;
