//! # Domain Layer
//!
//! Envelope, login and lock-call validation with no I/O of its own. The only
//! outside effects are a clock read and the injected token predicate.

pub mod envelope;
pub mod errors;
pub mod lock;
pub mod login;
pub mod skew;
