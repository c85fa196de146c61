use actix_web::{web, HttpResponse};

use ch_core::repositories::{TokenRepository, UserRepository};
use ch_core::services::token::Clock;

use crate::app::AppState;
use crate::dto::auth::CurrentUserResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/auth/me
pub async fn me<U, R, C>(state: web::Data<AppState<U, R, C>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    match state.auth_service.current_user(auth.user_id).await {
        Ok(current) => HttpResponse::Ok().json(CurrentUserResponse::from(current)),
        Err(error) => handle_domain_error(&error),
    }
}
