use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use url::Url;
use uuid::Uuid;

use super::AuthUser;
use crate::constructors::{AppState, SpotifySettings};
use crate::errors::{AppError, AppResult};
use crate::presenters;
use crate::usecases::auth::{login, me};
use crate::utils::LetChain;

pub const SPOTIFY_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

#[derive(Debug, Default, ::serde::Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<Credentials>,
) -> AppResult<HttpResponse> {
    let Credentials { email, password } = credentials.into_inner();

    state
        .auth
        .login
        .handle(login::Input { email, password })
        .await?
        .let_(presenters::auth::login)
        .let_(Ok)
}

pub async fn logout() -> HttpResponse { presenters::auth::logout() }

pub async fn me(AuthUser(claims): AuthUser, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    state
        .auth
        .me
        .handle(me::Input { claims })
        .await?
        .let_(presenters::auth::me)
        .let_(Ok)
}

pub(crate) fn authorize_url(settings: &SpotifySettings, state: &str) -> AppResult<Url> {
    let client_id = settings.client_id.as_deref().ok_or_else(|| {
        AppError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Spotify login is not configured",
        )
    })?;

    Url::parse_with_params(SPOTIFY_AUTHORIZE_URL, &[
        ("response_type", "code"),
        ("client_id", client_id),
        ("scope", settings.scopes.as_str()),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("state", state),
    ])
    .map_err(|e| AppError::Internal(e.into()))
}

/// Entry point of the OAuth flow: sends the browser to the provider.
pub async fn spotify(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let url = authorize_url(&state.spotify, &Uuid::new_v4().simple().to_string())?;

    Ok(HttpResponse::Found()
        .insert_header((LOCATION, url.as_str()))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(client_id: Option<&str>) -> SpotifySettings {
        SpotifySettings {
            client_id: client_id.map(str::to_string),
            redirect_uri: "http://localhost:8888/callback.html".to_string(),
            scopes: "user-read-private user-read-email".to_string(),
        }
    }

    #[test]
    fn authorize_url_carries_flow_parameters() {
        let url = authorize_url(&settings(Some("abc")), "xyz").unwrap();
        let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();

        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert!(pairs.contains(&("client_id".to_string(), "abc".to_string())));
        assert!(pairs.contains(&(
            "redirect_uri".to_string(),
            "http://localhost:8888/callback.html".to_string()
        )));
        assert!(pairs.contains(&("state".to_string(), "xyz".to_string())));
    }

    #[test]
    fn missing_client_id_is_unavailable() {
        let err = authorize_url(&settings(None), "s").unwrap_err();

        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
