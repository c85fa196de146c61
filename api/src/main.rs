use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use ch_api::{create_app, AppState};
use ch_core::services::auth::{AuthService, AuthServiceConfig};
use ch_core::services::token::{TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig};
use ch_infra::{MySqlTokenRepository, MySqlUserRepository};
use ch_shared::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(config.environment);

    info!(environment = %config.environment, "Starting CharterHub API server");

    config.validate()?;
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let pool = ch_infra::initialize(&config.database).await?;

    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let tokens = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));

    let token_service = Arc::new(TokenService::new(
        Arc::clone(&users),
        tokens,
        TokenServiceConfig::from(&config.auth.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        users,
        Arc::clone(&token_service),
        AuthServiceConfig::from(&config.auth.password),
    ));

    let cleanup = Arc::new(TokenCleanupService::new(
        token_service,
        TokenCleanupConfig::from(&config.auth.cleanup),
    ));
    let cleanup_task = cleanup.start_background_task();

    let state = web::Data::new(
        AppState::new(auth_service, config.auth.session.clone())
            .with_database(pool.clone())
            .with_max_payload_size(config.server.max_payload_size),
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()).wrap(TracingLogger::default()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    pool.close().await;
    info!("Server stopped");

    Ok(())
}

fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
