//! # HMAC Token Authority
//!
//! Stateless reference implementation of the token ports. Tokens have the
//! form `<uuid>.<hex hmac>` where the MAC is HMAC-SHA256 over the UUID bytes
//! keyed by a cluster-wide secret. Any node holding the secret can verify a
//! token minted by any other node without a shared session table.

use crate::ports::outbound::{TokenIssuer, TokenIssuerError, TokenVerifier};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use tracing::debug;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Length of a generated secret in bytes.
pub const SECRET_LEN: usize = 32;

/// Issues and verifies HMAC-signed tokens.
#[derive(Clone)]
pub struct HmacTokenAuthority {
    secret: Vec<u8>,
}

impl HmacTokenAuthority {
    /// Authority keyed by a pre-shared cluster secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Authority keyed by a fresh random secret. Tokens it issues are only
    /// verifiable by this instance and its clones.
    pub fn generate() -> Self {
        let mut secret = vec![0u8; SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut secret);
        Self { secret }
    }

    fn mac(&self) -> Option<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret).ok()
    }
}

impl TokenIssuer for HmacTokenAuthority {
    fn issue_token(&self, username: &str) -> Result<String, TokenIssuerError> {
        let mut mac = self
            .mac()
            .ok_or_else(|| TokenIssuerError::Unavailable("invalid HMAC key".to_string()))?;

        let id = Uuid::new_v4();
        mac.update(id.as_bytes());
        let tag = hex::encode(mac.finalize().into_bytes());

        debug!(username, token_id = %id, "Issued token");
        Ok(format!("{id}.{tag}"))
    }
}

impl TokenVerifier for HmacTokenAuthority {
    fn is_token_valid(&self, token: &str) -> bool {
        let Some((id, tag)) = token.split_once('.') else {
            return false;
        };
        let Ok(id) = Uuid::parse_str(id) else {
            return false;
        };
        let Ok(tag) = hex::decode(tag) else {
            return false;
        };
        let Some(mut mac) = self.mac() else {
            return false;
        };

        mac.update(id.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&tag).is_ok()
    }
}

impl std::fmt::Debug for HmacTokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacTokenAuthority")
            .field("secret", &"<redacted>")
            .finish()
    }
}
