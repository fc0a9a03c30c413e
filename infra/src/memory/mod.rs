//! In-memory store implementations
//!
//! Used by the API integration tests and by embedders that run without a
//! database. State does not survive a restart.

mod revocation_store;
mod user_repository;


pub use revocation_store::InMemoryRevocationStore;
pub use user_repository::InMemoryUserRepository;
