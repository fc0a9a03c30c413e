//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 signing and verification
//! - Access and refresh token issuance
//! - Revocation-aware validation and revocation
//! - Bearer header extraction

mod config;
mod service;
mod signer;
mod validator;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
pub use signer::TokenSigner;
pub use validator::{extract_bearer_token, TokenValidator, BEARER_PREFIX};
