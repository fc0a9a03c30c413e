//! Symmetric key used to sign and verify tokens.

use std::fmt;

use crate::errors::DomainError;

/// HS256 requires at least 256 bits of key material
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

/// Secret bytes for HMAC signing
///
/// Immutable after construction. Deliberately not `Serialize`, and its
/// `Debug` output never contains the key.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wraps raw key bytes, rejecting keys shorter than 256 bits
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, DomainError> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SIGNING_KEY_BYTES {
            return Err(DomainError::Validation {
                message: format!(
                    "Signing key must be at least {} bytes, got {}",
                    MIN_SIGNING_KEY_BYTES,
                    bytes.len()
                ),
            });
        }
        Ok(Self(bytes))
    }

    /// Uses the UTF-8 bytes of a configured secret
    pub fn from_secret(secret: &str) -> Result<Self, DomainError> {
        Self::new(secret.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<{} bytes redacted>)", self.0.len())
    }
}
