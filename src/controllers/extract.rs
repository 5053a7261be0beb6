use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::Utc;
use futures::future::{ready, Ready};

use crate::auth::Claims;
use crate::constructors::AppState;
use crate::errors::{AppError, AppResult};
use crate::presenters::auth::TOKEN_COOKIE;

pub const NOT_LOGGED_IN: &str = "You are not logged in";
pub const FORBIDDEN: &str = "You do not have permission to perform this action";

/// Bearer header first, then the session cookie.
fn token_of(req: &HttpRequest) -> Option<String> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    header.or_else(|| {
        req.cookie(TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

fn authenticate(req: &HttpRequest) -> AppResult<Claims> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("application state is not registered")))?;

    let token = token_of(req).ok_or_else(|| AppError::unauthorized(NOT_LOGGED_IN))?;

    state.signer.verify(&token, Utc::now())
}

/// Any signed-in caller.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Claims);

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(AuthUser))
    }
}

/// A signed-in caller holding the admin role.
#[derive(Debug, Clone, Copy)]
pub struct Admin(pub Claims);

impl FromRequest for Admin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let res = authenticate(req).and_then(|claims| match claims.is_admin() {
            true => Ok(Admin(claims)),
            false => Err(AppError::forbidden(FORBIDDEN)),
        });

        ready(res)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def"))
            .cookie(Cookie::new(TOKEN_COOKIE, "cookie.token"))
            .to_http_request();

        assert_eq!(token_of(&req).as_deref(), Some("abc.def"));
    }

    #[test]
    fn cookie_is_used_without_header() {
        let req = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, "cookie.token"))
            .to_http_request();

        assert_eq!(token_of(&req).as_deref(), Some("cookie.token"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();

        assert_eq!(token_of(&req), None);
    }
}
