use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;

use super::Envelope;
use crate::usecases::auth::{login, me};

pub const TOKEN_COOKIE: &str = "jwt";

pub fn login(login::Output { token, user }: login::Output) -> HttpResponse {
    let cookie = Cookie::build(TOKEN_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .finish();

    let mut res = Envelope::success(json!({ "user": user }))
        .token(token)
        .respond(StatusCode::OK);

    if let Err(e) = res.add_cookie(&cookie) {
        tracing::warn!("cannot set token cookie: {}", e);
    }

    res
}

/// Stateless tokens: logging out only clears the cookie.
pub fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "").path("/").http_only(true).finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "status": "success" }))
}

pub fn me(me::Output { user }: me::Output) -> HttpResponse {
    Envelope::success(json!({ "user": user })).respond(StatusCode::OK)
}
