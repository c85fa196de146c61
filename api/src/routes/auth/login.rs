use actix_web::{web, HttpResponse};
use validator::Validate;

use ch_core::repositories::{TokenRepository, UserRepository};
use ch_core::services::token::Clock;

use crate::app::AppState;
use crate::dto::auth::{LoginRequest, LoginResponse, TokenResponse, UserResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::refresh_cookie;

/// Handler for POST /api/auth/login
///
/// # Request Body
///
/// ```json
/// {
///     "email": "captain@example.com",
///     "password": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// Token pair plus the user profile; the refresh token is also set as the
/// session cookie.
///
/// ## Errors
/// - 400 Bad Request: Invalid email format or empty password
/// - 401 Unauthorized: Unknown email or wrong password
/// - 403 Forbidden: Account not verified
pub async fn login<U, R, C>(
    state: web::Data<AppState<U, R, C>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(outcome) => {
            let cookie = refresh_cookie(
                &state.session,
                &outcome.tokens.refresh_token,
                outcome.tokens.refresh_expires_in,
            );
            let response = LoginResponse {
                user: UserResponse::from(&outcome.user),
                tokens: TokenResponse::from(outcome.tokens),
            };

            HttpResponse::Ok().cookie(cookie).json(response)
        }
        Err(error) => handle_domain_error(&error),
    }
}
