//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API the RPC server calls before dispatching
//! - **Outbound (Driven)**: Credential store, clock and lock subsystem

pub mod inbound;
pub mod outbound;
