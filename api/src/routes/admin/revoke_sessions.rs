use actix_web::{web, HttpResponse};

use ch_core::repositories::{TokenRepository, UserRepository};
use ch_core::services::token::Clock;

use crate::app::AppState;
use crate::dto::auth::RevokeSessionsResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/admin/users/{user_id}/revoke-sessions
///
/// ## Errors
/// - 403 Forbidden: Caller is not an admin
/// - 404 Not Found: No such user
pub async fn revoke_sessions<U, R, C>(
    state: web::Data<AppState<U, R, C>>,
    auth: AuthContext,
    path: web::Path<u64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    let target_user_id = path.into_inner();

    match state
        .auth_service
        .revoke_user_sessions(auth.role, target_user_id)
        .await
    {
        Ok(token_version) => {
            tracing::info!(
                admin_id = auth.user_id,
                target_user_id,
                "Admin revoked user sessions"
            );
            HttpResponse::Ok().json(RevokeSessionsResponse {
                user_id: target_user_id,
                token_version,
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
