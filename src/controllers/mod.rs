//! HTTP adapters: decode the request, call a usecase, hand the output to a
//! presenter.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::errors::{AppError, AppResult};

pub mod auth;
pub mod extract;
pub mod message;
pub mod notification;
pub mod portfolio;
pub mod project;

pub use extract::{Admin, AuthUser};

pub const API_PREFIX: &str = "/api";

/// Registers every route plus the payload error handlers.
///
/// Expects `web::Data<AppState>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        AppError::bad_request(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        AppError::bad_request(format!("Invalid query: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _| {
        AppError::bad_request(format!("Invalid path: {}", err)).into()
    }))
    .service(
        web::scope(API_PREFIX)
            .route("/health", web::get().to(health))
            .service(
                web::scope("/projects")
                    .route("", web::get().to(project::gets))
                    .route("", web::post().to(project::create))
                    .route("/{id}", web::get().to(project::get))
                    .route("/{id}", web::put().to(project::edit))
                    .route("/{id}", web::delete().to(project::delete)),
            )
            .service(
                web::scope("/contact")
                    .route("", web::post().to(message::submit))
                    .route("/messages", web::get().to(message::gets))
                    .route("/messages/{id}", web::get().to(message::get))
                    .route("/messages/{id}", web::put().to(message::edit))
                    .route("/messages/{id}", web::delete().to(message::delete)),
            )
            .service(
                web::scope("/portfolio")
                    .route("", web::get().to(portfolio::get))
                    .route("", web::put().to(portfolio::update)),
            )
            .service(
                web::scope("/notifications")
                    .route("", web::get().to(notification::gets))
                    .route("", web::post().to(notification::create))
                    .route("/unread-count", web::get().to(notification::unread_count))
                    .route("/read-all", web::put().to(notification::mark_all_read))
                    .route("/{id}/read", web::put().to(notification::mark_read)),
            )
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me))
                    .route("/spotify", web::get().to(auth::spotify)),
            ),
    )
    .default_service(web::route().to(not_found));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "API is running",
    }))
}

async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::not_found(format!(
        "Can't find {} on this server",
        req.path()
    )))
}
