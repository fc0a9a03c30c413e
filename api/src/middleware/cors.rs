//! CORS middleware configuration for cross-origin requests.
//!
//! With no configured origins the policy is permissive, which is only meant
//! for development. Once `server.allowed_origins` lists anything, only those
//! origins are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use inno_shared::ServerConfig;

/// Preflight cache lifetime in seconds
const CORS_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for the configured origins
pub fn create_cors(server: &ServerConfig) -> Cors {
    if server.allowed_origins.is_empty() {
        create_development_cors()
    } else {
        create_restricted_cors(&server.allowed_origins)
    }
}

fn create_development_cors() -> Cors {
    tracing::debug!("Configuring permissive CORS");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(CORS_MAX_AGE)
}

fn create_restricted_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(CORS_MAX_AGE);

    for origin in origins.iter().map(|o| o.trim()).filter(|o| !o.is_empty()) {
        tracing::info!(origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}
