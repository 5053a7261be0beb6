//! Error normalization.
//!
//! Every [`AppError`] is first translated into a status and a client-facing
//! message, then rendered according to the [`Mode`]. Development responses
//! carry the whole error; production responses carry only the status class
//! and the message, and never the message of a non-operational error.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use futures::future::{ready, LocalBoxFuture, Ready};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;

use crate::config::Mode;
use crate::errors::AppError;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#""[^"]*"|'[^']*'"#).unwrap();
}

pub const INTERNAL_MESSAGE: &str = "Something went wrong";

/// An error after translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub status: StatusCode,
    pub message: String,
    /// Whether `message` may be shown to the client as is.
    pub operational: bool,
}

impl Normalized {
    fn operational(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            operational: true,
        }
    }

    /// `fail` for client errors, `error` for everything else.
    pub fn class(&self) -> &'static str {
        match self.status.is_client_error() {
            true => "fail",
            false => "error",
        }
    }
}

fn duplicate_message(raw: &str) -> String {
    match QUOTED.find(raw) {
        Some(m) => format!("Duplicate field value: {}", m.as_str()),
        None => format!("Duplicate field value: {}", raw),
    }
}

pub fn normalize(err: &AppError, mode: Mode) -> Normalized {
    match err {
        AppError::Operational { status, message } => Normalized::operational(*status, message.as_str()),
        AppError::InvalidToken => Normalized::operational(StatusCode::UNAUTHORIZED, "Invalid token"),
        AppError::TokenExpired => Normalized::operational(StatusCode::UNAUTHORIZED, "token has expired"),
        AppError::Duplicate(raw) => Normalized::operational(StatusCode::BAD_REQUEST, duplicate_message(raw)),
        AppError::Validation(errs) => Normalized::operational(StatusCode::BAD_REQUEST, errs.to_string()),
        AppError::Internal(e) => Normalized {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: match mode {
                Mode::Development => e.to_string(),
                Mode::Production => INTERNAL_MESSAGE.to_string(),
            },
            operational: false,
        },
    }
}

pub fn render(err: &AppError, mode: Mode) -> HttpResponse {
    let n = normalize(err, mode);

    let body = match mode {
        Mode::Production => {
            if !n.operational {
                tracing::error!(error = ?err, "unhandled error");
            }

            json!({
                "status": n.class(),
                "message": n.message,
            })
        },
        Mode::Development => json!({
            "status": n.class(),
            "error": {
                "name": err.name(),
                "statusCode": n.status.as_u16(),
                "status": n.class(),
                "isOperational": err.is_operational(),
                "detail": err.to_string(),
            },
            "message": n.message,
            "stack": format!("{:?}", err),
        }),
    };

    HttpResponse::build(n.status).json(body)
}

/// Re-renders [`AppError`] responses for the configured mode.
///
/// Handlers' errors render for production on their own, so production
/// responses pass through untouched.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeErrors {
    pub mode: Mode,
}

impl<S, B> Transform<S, ServiceRequest> for NormalizeErrors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = NormalizeErrorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(NormalizeErrorsMiddleware {
            service,
            mode: self.mode,
        }))
    }
}

pub struct NormalizeErrorsMiddleware<S> {
    service: S,
    mode: Mode,
}

impl<S, B> Service<ServiceRequest> for NormalizeErrorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let mode = self.mode;
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            let rendered = match mode {
                Mode::Production => None,
                Mode::Development => res
                    .response()
                    .error()
                    .and_then(|e| e.as_error::<AppError>())
                    .map(|e| render(e, mode)),
            };

            Ok(match rendered {
                Some(http) => res.into_response(http).map_into_right_body(),
                None => res.map_into_left_body(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::{web, App};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::errors::ValidationErrors;

    fn validation() -> AppError {
        let mut errs = ValidationErrors::default();
        errs.push("name", "Name is required");
        errs.push("message", "Message must be at least 10 characters");
        AppError::Validation(errs)
    }

    #[rstest]
    #[case(AppError::InvalidToken, 401, "Invalid token")]
    #[case(AppError::TokenExpired, 401, "token has expired")]
    #[case(
        AppError::Duplicate(
            "E11000 duplicate key error collection: projects index: slug_1 dup key: { slug: \"hello-world\" }".to_string()
        ),
        400,
        "Duplicate field value: \"hello-world\""
    )]
    #[case(validation(), 400, "Name is required. Message must be at least 10 characters")]
    #[case(AppError::not_found("nope"), 404, "nope")]
    #[case(AppError::Internal(anyhow::anyhow!("db exploded")), 500, INTERNAL_MESSAGE)]
    fn production_translation(#[case] err: AppError, #[case] status: u16, #[case] message: &str) {
        let n = normalize(&err, Mode::Production);

        assert_eq!(n.status.as_u16(), status);
        assert_eq!(n.message, message);
    }

    #[test]
    fn status_class_follows_status() {
        assert_eq!(normalize(&AppError::bad_request("x"), Mode::Production).class(), "fail");
        assert_eq!(
            normalize(&AppError::Internal(anyhow::anyhow!("x")), Mode::Production).class(),
            "error"
        );
    }

    #[actix_web::test]
    async fn production_body_hides_internal_detail() {
        let res = render(&AppError::Internal(anyhow::anyhow!("secret dsn")), Mode::Production);
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let text = std::str::from_utf8(&body).unwrap();
        assert!(!text.contains("secret dsn"));
        assert!(!text.contains("stack"));

        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["message"], INTERNAL_MESSAGE);
    }

    async fn fails() -> Result<HttpResponse, AppError> {
        Err(AppError::Internal(anyhow::anyhow!("disk full")))
    }

    #[actix_web::test]
    async fn development_mode_exposes_error_and_stack() {
        let app = init_service(
            App::new()
                .wrap(NormalizeErrors {
                    mode: Mode::Development,
                })
                .route("/", web::get().to(fails)),
        )
        .await;

        let res = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let v: Value = read_body_json(res).await;
        assert_eq!(v["message"], "disk full");
        assert_eq!(v["error"]["isOperational"], false);
        assert!(v["stack"].as_str().unwrap().contains("disk full"));
    }

    #[actix_web::test]
    async fn production_mode_keeps_opaque_body() {
        let app = init_service(
            App::new()
                .wrap(NormalizeErrors {
                    mode: Mode::Production,
                })
                .route("/", web::get().to(fails)),
        )
        .await;

        let res = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        let v: Value = read_body_json(res).await;

        assert_eq!(v, json!({ "status": "error", "message": INTERNAL_MESSAGE }));
    }
}
