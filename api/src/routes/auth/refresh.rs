use actix_web::{web, HttpRequest, HttpResponse};

use ch_core::errors::DomainError;
use ch_core::repositories::{TokenRepository, UserRepository};
use ch_core::services::token::Clock;

use crate::app::AppState;
use crate::dto::auth::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

use super::{presented_refresh_token, refresh_cookie, removal_cookie};

/// Handler for POST /api/auth/refresh
///
/// Exchanges a refresh token for a new pair. The token comes from the body
/// (`{"refresh_token": "..."}`) or from the session cookie; the presented
/// token is consumed whatever the outcome.
///
/// ## Errors
/// - 400 Bad Request: No refresh token presented
/// - 401 Unauthorized: Unknown, reused, expired or revoked refresh token
pub async fn refresh<U, R, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, R, C>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    let token = match presented_refresh_token(&req, body.as_deref(), &state.session) {
        Some(token) => token,
        None => {
            return handle_domain_error(&DomainError::Validation {
                message: "refresh_token is required".to_string(),
            })
        }
    };

    match state.auth_service.refresh(&token).await {
        Ok(pair) => {
            let cookie = refresh_cookie(&state.session, &pair.refresh_token, pair.refresh_expires_in);
            HttpResponse::Ok().cookie(cookie).json(TokenResponse::from(pair))
        }
        Err(error) if error.is_token_rejection() => {
            let mut response = handle_domain_error(&error);
            // A dead refresh cookie is useless to the browser
            if let Err(e) = response.add_removal_cookie(&removal_cookie(&state.session)) {
                tracing::warn!("Failed to clear refresh cookie: {}", e);
            }
            response
        }
        Err(error) => handle_domain_error(&error),
    }
}
