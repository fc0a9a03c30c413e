//! Authentication service module
//!
//! Login, logout, refresh and profile use cases on top of the token service,
//! user lookup and password verification.

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::{BcryptPasswordVerifier, PasswordVerifier};
pub use service::AuthService;

#[cfg(test)]
use service::UNKNOWN_USER_HASH;
