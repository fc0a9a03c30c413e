//! Application factory
//!
//! Builds the Actix-web application around an already wired [`AppState`].

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::json_error_handler;
use crate::middleware::{
    auth::{JwtAuth, RequestAuthenticator},
    cors::create_cors,
};
use crate::routes::auth::{
    login::login, logout::logout, profile::profile, refresh::refresh, AppState,
};

use inno_core::repositories::{RevocationStore, UserRepository};
use inno_core::services::PasswordVerifier;
use inno_shared::{error_codes, ErrorResponse, ServerConfig};

/// Create and configure the application with all dependencies
pub fn create_app<U, P, R>(
    app_state: web::Data<AppState<U, P, R>>,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    P: PasswordVerifier + 'static,
    R: RevocationStore + 'static,
{
    let authenticator: Arc<dyn RequestAuthenticator> = app_state.token_validator.clone();

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::Data::from(authenticator))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Tracing wraps CORS so rejected preflights are logged too
        .wrap(create_cors(server))
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/login", web::post().to(login::<U, P, R>))
                    .route("/refresh", web::post().to(refresh::<U, P, R>))
                    // Only these two read the caller's identity
                    .service(
                        web::resource("/logout")
                            .wrap(JwtAuth::new())
                            .route(web::post().to(logout::<U, P, R>)),
                    )
                    .service(
                        web::resource("/profile")
                            .wrap(JwtAuth::new())
                            .route(web::get().to(profile::<U, P, R>)),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "innosistemas-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
