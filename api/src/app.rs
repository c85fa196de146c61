//! Application state and factory

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};

use ch_core::repositories::{TokenRepository, UserRepository};
use ch_core::services::auth::AuthService;
use ch_core::services::token::{Clock, SystemClock};
use ch_infra::DatabasePool;
use ch_shared::config::SessionConfig;
use ch_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::auth::{AccessTokenValidator, JwtAuth};
use crate::routes::admin::revoke_sessions::revoke_sessions;
use crate::routes::auth::{
    change_password::change_password, login::login, logout::logout, logout_all::logout_all,
    me::me, refresh::refresh,
};
use crate::routes::health::health_check;

/// Application state that holds shared services
pub struct AppState<U, R, C = SystemClock>
where
    U: UserRepository,
    R: TokenRepository,
    C: Clock,
{
    pub auth_service: Arc<AuthService<U, R, C>>,
    /// Refresh cookie settings
    pub session: SessionConfig,
    /// Probed by the health endpoint when present
    pub database: Option<DatabasePool>,
    /// Upper bound for JSON request bodies
    pub max_payload_size: usize,
}

impl<U, R, C> AppState<U, R, C>
where
    U: UserRepository,
    R: TokenRepository,
    C: Clock,
{
    pub fn new(auth_service: Arc<AuthService<U, R, C>>, session: SessionConfig) -> Self {
        Self {
            auth_service,
            session,
            database: None,
            max_payload_size: 64 * 1024,
        }
    }

    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }

    pub fn with_max_payload_size(mut self, limit: usize) -> Self {
        self.max_payload_size = limit;
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, R, C>(
    app_state: web::Data<AppState<U, R, C>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    let validator: Arc<dyn AccessTokenValidator> = app_state.auth_service.token_service().clone();
    let json_config = web::JsonConfig::default().limit(app_state.max_payload_size);

    App::new()
        .app_data(app_state)
        .app_data(web::Data::from(validator))
        .app_data(json_config)
        .route("/health", web::get().to(health_check::<U, R, C>))
        .service(
            web::scope("/api/auth")
                .route("/login", web::post().to(login::<U, R, C>))
                .route("/refresh", web::post().to(refresh::<U, R, C>))
                .route("/logout", web::post().to(logout::<U, R, C>))
                .route(
                    "/logout-all",
                    web::post().to(logout_all::<U, R, C>).wrap(JwtAuth::new()),
                )
                .route(
                    "/change-password",
                    web::post().to(change_password::<U, R, C>).wrap(JwtAuth::new()),
                )
                .route("/me", web::get().to(me::<U, R, C>).wrap(JwtAuth::new())),
        )
        .service(
            web::scope("/api/admin")
                .wrap(JwtAuth::new())
                .route(
                    "/users/{user_id}/revoke-sessions",
                    web::post().to(revoke_sessions::<U, R, C>),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
