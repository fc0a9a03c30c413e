//! # InnoSistemas Core
//!
//! Core business logic and domain layer for the InnoSistemas backend.
//! This crate contains domain entities, the token lifecycle and authentication
//! services, repository interfaces, and error types. It has no knowledge of
//! HTTP or of any particular database.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
