//! Request and response bodies of the HTTP API

pub mod auth;

pub use auth::*;
pub use inno_shared::ErrorResponse;
