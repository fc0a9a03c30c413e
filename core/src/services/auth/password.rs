//! Password verification collaborator

/// Checks a raw password against a stored hash
pub trait PasswordVerifier: Send + Sync {
    fn matches(&self, raw: &str, hash: &str) -> bool;
}

/// Verifies bcrypt hashes such as `$2a$10$...`
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptPasswordVerifier;

impl PasswordVerifier for BcryptPasswordVerifier {
    fn matches(&self, raw: &str, hash: &str) -> bool {
        // A hash that does not parse is a mismatch, not an error.
        bcrypt::verify(raw, hash).unwrap_or(false)
    }
}
