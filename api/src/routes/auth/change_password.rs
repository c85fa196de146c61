use actix_web::{web, HttpResponse};
use validator::Validate;

use ch_core::repositories::{TokenRepository, UserRepository};
use ch_core::services::token::Clock;

use crate::app::AppState;
use crate::dto::auth::{ChangePasswordRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthContext;

use super::refresh_cookie;

/// Handler for POST /api/auth/change-password
///
/// Every existing session of the caller ends; the response carries a fresh
/// pair for the new one.
///
/// ## Errors
/// - 400 Bad Request: New password too short
/// - 401 Unauthorized: Wrong current password or invalid access token
pub async fn change_password<U, R, C>(
    state: web::Data<AppState<U, R, C>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .change_password(auth.user_id, &request.current_password, &request.new_password)
        .await
    {
        Ok(pair) => {
            let cookie = refresh_cookie(&state.session, &pair.refresh_token, pair.refresh_expires_in);
            HttpResponse::Ok().cookie(cookie).json(TokenResponse::from(pair))
        }
        Err(error) => handle_domain_error(&error),
    }
}
