//! MySQL implementations of the core repository traits

mod revocation_store_impl;
mod user_repository_impl;

pub use revocation_store_impl::MySqlRevocationStore;
pub use user_repository_impl::MySqlUserRepository;
