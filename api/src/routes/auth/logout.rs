use actix_web::{web, HttpRequest, HttpResponse};

use ch_core::repositories::{TokenRepository, UserRepository};
use ch_core::services::token::Clock;

use crate::app::AppState;
use crate::dto::auth::{LogoutResponse, RefreshTokenRequest};
use crate::handlers::error::handle_domain_error;

use super::{presented_refresh_token, removal_cookie};

/// Handler for POST /api/auth/logout
///
/// Ends the session of the presented refresh token and clears the cookie.
/// Logging out with an unknown or missing token still succeeds.
pub async fn logout<U, R, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, R, C>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    if let Some(token) = presented_refresh_token(&req, body.as_deref(), &state.session) {
        if let Err(error) = state.auth_service.logout(&token).await {
            return handle_domain_error(&error);
        }
    }

    HttpResponse::Ok()
        .cookie(removal_cookie(&state.session))
        .json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        })
}
