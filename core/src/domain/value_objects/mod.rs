//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod signing_key;

// Re-export commonly used types
pub use auth_response::{AuthResponse, LogoutOutcome};
pub use signing_key::{SigningKey, MIN_SIGNING_KEY_BYTES};
