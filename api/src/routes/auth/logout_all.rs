use actix_web::{web, HttpResponse};

use ch_core::repositories::{TokenRepository, UserRepository};
use ch_core::services::token::Clock;

use crate::app::AppState;
use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::removal_cookie;

/// Handler for POST /api/auth/logout-all
///
/// Invalidates every access and refresh token of the caller, including the
/// one used for this request.
pub async fn logout_all<U, R, C>(
    state: web::Data<AppState<U, R, C>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    match state.auth_service.logout_everywhere(auth.user_id).await {
        Ok(_) => HttpResponse::Ok()
            .cookie(removal_cookie(&state.session))
            .json(LogoutResponse {
                message: "Logged out of all sessions".to_string(),
            }),
        Err(error) => handle_domain_error(&error),
    }
}
