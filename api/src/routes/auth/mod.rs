//! Authentication route handlers
//!
//! Login, refresh with rotation, logout of one or all sessions, password
//! change and the current-user profile. The refresh token travels in the
//! JSON body or in the session cookie.

pub mod change_password;
pub mod login;
pub mod logout;
pub mod logout_all;
pub mod me;
pub mod refresh;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::HttpRequest;

use ch_shared::config::SessionConfig;

use crate::dto::auth::RefreshTokenRequest;

/// Session cookie carrying a refresh token
pub fn refresh_cookie(session: &SessionConfig, value: &str, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(session.cookie_name.clone(), value.to_string())
        .path(session.cookie_path.clone())
        .http_only(session.http_only)
        .secure(session.secure)
        .same_site(same_site(&session.same_site))
        .max_age(CookieDuration::seconds(max_age_seconds))
        .finish()
}

/// Cookie that makes the browser drop the refresh cookie
pub fn removal_cookie(session: &SessionConfig) -> Cookie<'static> {
    let mut cookie = refresh_cookie(session, "", 0);
    cookie.make_removal();
    cookie
}

/// The body field wins over the cookie; blank values count as absent
pub fn presented_refresh_token(
    req: &HttpRequest,
    body: Option<&RefreshTokenRequest>,
    session: &SessionConfig,
) -> Option<String> {
    body.and_then(|b| b.refresh_token.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| {
            req.cookie(&session.cookie_name)
                .map(|c| c.value().trim().to_string())
                .filter(|t| !t.is_empty())
        })
}

fn same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_refresh_cookie_attributes() {
        let session = SessionConfig::default();
        let cookie = refresh_cookie(&session, "abc", 604_800);

        assert_eq!(cookie.name(), "charterhub_refresh");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/api/auth"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(604_800)));
    }

    #[test]
    fn test_removal_cookie_is_empty_and_expired() {
        let cookie = removal_cookie(&SessionConfig::default());

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }

    #[test]
    fn test_body_token_preferred_over_cookie() {
        let session = SessionConfig::default();
        let req = TestRequest::default()
            .cookie(Cookie::new("charterhub_refresh", "from-cookie"))
            .to_http_request();
        let body = RefreshTokenRequest {
            refresh_token: Some("from-body".to_string()),
        };

        assert_eq!(
            presented_refresh_token(&req, Some(&body), &session).as_deref(),
            Some("from-body")
        );
        assert_eq!(
            presented_refresh_token(&req, None, &session).as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn test_blank_token_is_absent() {
        let session = SessionConfig::default();
        let req = TestRequest::default().to_http_request();
        let body = RefreshTokenRequest {
            refresh_token: Some("   ".to_string()),
        };

        assert_eq!(presented_refresh_token(&req, Some(&body), &session), None);
    }
}
