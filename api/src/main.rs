use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use inno_api::{app::create_app, routes::auth::AppState};
use inno_core::domain::value_objects::SigningKey;
use inno_core::services::{
    AuthService, BcryptPasswordVerifier, TokenService, TokenServiceConfig, TokenSigner,
};
use inno_infra::database::{DatabasePool, MySqlRevocationStore, MySqlUserRepository};
use inno_infra::services::RevocationSweeper;
use inno_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter())),
        )
        .init();

    info!(environment = %config.environment, "Starting InnoSistemas auth server");

    let jwt = &config.auth.jwt;
    if jwt.is_using_default_secret() {
        warn!("Using the built-in development JWT secret");
    }
    let signing_key = SigningKey::from_secret(&jwt.secret)?;
    let signer = TokenSigner::new(&signing_key).with_issuer(jwt.issuer.clone());

    // Storage
    let pool = DatabasePool::new(&config.database).await?;
    pool.run_migrations().await?;
    info!("{}", pool.get_statistics());

    let revocation_store = Arc::new(MySqlRevocationStore::new(pool.get_pool().clone()));
    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));

    // Services
    let token_service = Arc::new(TokenService::new(
        revocation_store.clone(),
        signer,
        TokenServiceConfig::from(jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::new(BcryptPasswordVerifier),
        token_service,
    ));

    let sweeper = Arc::new(RevocationSweeper::new(
        revocation_store,
        config.auth.sweeper.clone(),
    ));
    let sweeper_task = sweeper.start_background_task();

    let app_state = web::Data::new(AppState::new(auth_service));
    let server_config = config.server.clone();
    let bind_address = server_config.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &server_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    if let Some(task) = sweeper_task {
        task.abort();
    }
    pool.close().await;
    info!("Server stopped");
    Ok(())
}
