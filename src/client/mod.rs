//! Client side of the API: HTTP services plus the stores a UI reads from.
//!
//! Nothing here is ambient. The bearer token lives in a [`Credentials`]
//! value the caller owns and hands to every call; a `401` answer clears it.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

pub mod services;
pub mod stores;

pub use services::{AuthService, ContactService, HttpApi, ProjectService};
pub use stores::{AuthStore, ProjectsStore};

pub type ClientResult<T> = ::core::result::Result<T, ClientError>;

/// Bearer token of the signed-in user, if any.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl ::core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct("Credentials")
            .field("signed_in", &self.token.is_some())
            .finish()
    }
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> { self.token.as_deref() }

    pub fn set(&mut self, token: impl Into<String>) { self.token = Some(token.into()); }

    pub fn clear(&mut self) { self.token = None; }

    pub fn is_signed_in(&self) -> bool { self.token.is_some() }
}

/// A failed call, carrying the server's message when it sent one and the
/// call's fallback text otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub status: Option<u16>,
    pub message: String,
}

impl ClientError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl ::std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ::std::error::Error for ClientError {}

/// The `message` of an error body, if the body is one.
fn server_message(body: &Option<Value>) -> Option<String> {
    body.as_ref()?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Deserializes `body.data.<key>`.
pub(crate) fn data_field<T: DeserializeOwned>(body: Value, key: &str, fallback: &str) -> ClientResult<T> {
    let field = match body {
        Value::Object(mut root) => match root.remove("data") {
            Some(Value::Object(mut data)) => data.remove(key),
            _ => None,
        },
        _ => None,
    };

    field
        .ok_or_else(|| ClientError::new(None, fallback))
        .and_then(|v| {
            serde_json::from_value(v).map_err(|e| {
                tracing::debug!("unexpected `{}` payload: {}", key, e);
                ClientError::new(None, fallback)
            })
        })
}

/// Thin wrapper over one API base url.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base: Url,
}

impl Transport {
    /// `base` is the API root, such as `http://localhost:5000/api`.
    pub fn new(base: &str) -> ClientResult<Self> {
        let mut base = Url::parse(base)
            .map_err(|e| ClientError::new(None, format!("invalid API url `{}`: {}", base, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(::std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::new(None, format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url { &self.base }

    /// Sends one request. `Ok(None)` means an empty success body.
    pub async fn call<B: Serialize + ?Sized + Sync>(
        &self,
        creds: &mut Credentials,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> ClientResult<Option<Value>> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|_| ClientError::new(None, fallback))?;

        let mut req = self.http.request(method, url);
        if let Some(token) = creds.token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await.map_err(|e| {
            tracing::debug!("request to {} failed: {}", path, e);
            ClientError::new(None, fallback)
        })?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            creds.clear();
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = res.text().await.map_err(|_| ClientError::new(Some(status.as_u16()), fallback))?;
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        match status.is_success() {
            true => parsed
                .map(Some)
                .ok_or_else(|| ClientError::new(Some(status.as_u16()), fallback)),
            false => Err(ClientError::new(
                Some(status.as_u16()),
                server_message(&parsed).unwrap_or_else(|| fallback.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        assert_eq!(
            server_message(&Some(json!({ "status": "fail", "message": "Invalid token" }))),
            Some("Invalid token".to_string())
        );
        assert_eq!(server_message(&Some(json!({ "message": "" }))), None);
        assert_eq!(server_message(&None), None);
    }

    #[test]
    fn data_field_digs_into_envelope() {
        let body = json!({ "status": "success", "data": { "count": 3 } });

        assert_eq!(data_field::<u64>(body.clone(), "count", "x"), Ok(3));
        assert_eq!(
            data_field::<u64>(body, "missing", "Failed to load"),
            Err(ClientError::new(None, "Failed to load"))
        );
    }

    #[test]
    fn base_gains_trailing_slash() {
        let t = Transport::new("http://localhost:5000/api").unwrap();

        assert_eq!(t.base().as_str(), "http://localhost:5000/api/");
        assert_eq!(t.base().join("projects").unwrap().path(), "/api/projects");
    }

    #[test]
    fn credentials_debug_hides_token() {
        let c = Credentials::new("secret-token");

        assert!(!format!("{:?}", c).contains("secret-token"));
        assert!(c.is_signed_in());
    }
}
