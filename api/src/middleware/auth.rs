//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! validates it through the [`AccessTokenValidator`] registered as app data
//! and injects an [`AuthContext`] into the request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use ch_core::{
    domain::entities::{token::Claims, user::UserRole},
    errors::{DomainError, DomainResult},
    repositories::{TokenRepository, UserRepository},
    services::token::{Clock, TokenService},
};

use crate::handlers::error::{handle_domain_error, ApiError};

/// User authentication context injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// User ID from the `sub` claim
    pub user_id: u64,
    /// Role at the time the token was issued
    pub role: UserRole,
    pub token_version: u32,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.user_id(),
            role: claims.role,
            token_version: claims.ver,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Validates access tokens for the middleware
///
/// Registered as `web::Data<dyn AccessTokenValidator>` so the middleware does
/// not depend on the repository types behind the token service.
#[async_trait]
pub trait AccessTokenValidator: Send + Sync {
    async fn validate_access_token(&self, token: &str) -> DomainResult<Claims>;
}

#[async_trait]
impl<U, R, C> AccessTokenValidator for TokenService<U, R, C>
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    async fn validate_access_token(&self, token: &str) -> DomainResult<Claims> {
        self.validate(token).await
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let validator = req.app_data::<web::Data<dyn AccessTokenValidator>>().cloned();
        let token = extract_bearer_token(&req);

        Box::pin(async move {
            match authenticate(token, validator).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                // Rejections are answered here rather than propagated as errors
                Err(error) => {
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

async fn authenticate(
    token: Option<String>,
    validator: Option<web::Data<dyn AccessTokenValidator>>,
) -> DomainResult<AuthContext> {
    let token = token.ok_or(DomainError::Unauthorized)?;

    let validator = validator.ok_or_else(|| {
        tracing::error!("No access token validator registered");
        DomainError::Internal {
            message: "JWT verification not configured".to_string(),
        }
    })?;

    let claims = validator.validate_access_token(&token).await?;
    Ok(AuthContext::from_claims(&claims))
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| Error::from(ApiError(DomainError::Unauthorized)));

        ready(result)
    }
}
