use actix_web::{web, HttpResponse};

use super::Admin;
use crate::constructors::AppState;
use crate::entities::Portfolio;
use crate::errors::AppResult;
use crate::presenters;
use crate::usecases::portfolio::{get, update};
use crate::utils::LetChain;

pub async fn get(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    state
        .portfolio
        .get
        .handle(get::Input {})
        .await?
        .let_(presenters::portfolio::get)
        .let_(Ok)
}

pub async fn update(
    _: Admin,
    state: web::Data<AppState>,
    portfolio: web::Json<Portfolio>,
) -> AppResult<HttpResponse> {
    state
        .portfolio
        .update
        .handle(update::Input {
            portfolio: portfolio.into_inner(),
        })
        .await?
        .let_(presenters::portfolio::update)
        .let_(Ok)
}
