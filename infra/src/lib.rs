//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the InnoSistemas backend,
//! following Clean Architecture principles. It provides concrete implementations
//! of the repository traits declared in `inno_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL implementations using SQLx, plus the connection pool
//! - **Memory**: in-process stores for development and tests
//! - **Services**: background housekeeping (revocation sweeper)
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use inno_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// In-memory store implementations
pub mod memory;

/// Services module - Infrastructure service implementations
pub mod services;

/// Configuration types consumed by this crate
pub mod config {
    pub use inno_shared::config::{DatabaseConfig, SweeperConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
