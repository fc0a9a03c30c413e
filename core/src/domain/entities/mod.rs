//! Domain entities representing core business objects.

pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{
    hash_token, Claims, Principal, RevokedToken, TokenKind, TokenPair, BEARER_TOKEN_TYPE,
    JWT_ISSUER,
};
pub use user::{User, UserProfile};
