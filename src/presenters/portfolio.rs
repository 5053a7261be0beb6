use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;

use super::Envelope;
use crate::usecases::portfolio::{get, update};

pub fn get(get::Output { portfolio }: get::Output) -> HttpResponse {
    Envelope::success(json!({ "portfolio": portfolio })).respond(StatusCode::OK)
}

pub fn update(update::Output { portfolio }: update::Output) -> HttpResponse {
    Envelope::success(json!({ "portfolio": portfolio })).respond(StatusCode::OK)
}
