use actix_web::{web, HttpResponse};

use super::{Admin, AuthUser};
use crate::constructors::AppState;
use crate::entities::{NotificationDraft, NotificationId};
use crate::errors::AppResult;
use crate::presenters;
use crate::repositories::{NotificationQuery, Paging};
use crate::usecases::notification::{create, gets, mark_all_read, mark_read, unread_count};
use crate::utils::LetChain;

#[derive(Debug, Default, ::serde::Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub unread: bool,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn gets(
    AuthUser(claims): AuthUser,
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let query = NotificationQuery {
        recipient: claims.sub,
        unread_only: params.unread,
        paging: Paging::new(params.page, params.limit),
    };

    state
        .notifications
        .gets
        .handle(gets::Input { query })
        .await?
        .let_(presenters::notification::gets)
        .let_(Ok)
}

pub async fn unread_count(
    AuthUser(claims): AuthUser,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    state
        .notifications
        .unread_count
        .handle(unread_count::Input {
            recipient: claims.sub,
        })
        .await?
        .let_(presenters::notification::unread_count)
        .let_(Ok)
}

pub async fn mark_read(
    AuthUser(claims): AuthUser,
    state: web::Data<AppState>,
    notification_id: web::Path<NotificationId>,
) -> AppResult<HttpResponse> {
    state
        .notifications
        .mark_read
        .handle(mark_read::Input {
            notification_id: notification_id.into_inner(),
            recipient: claims.sub,
        })
        .await?
        .let_(presenters::notification::mark_read)
        .let_(Ok)
}

pub async fn mark_all_read(
    AuthUser(claims): AuthUser,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    state
        .notifications
        .mark_all_read
        .handle(mark_all_read::Input {
            recipient: claims.sub,
        })
        .await?
        .let_(presenters::notification::mark_all_read)
        .let_(Ok)
}

pub async fn create(
    Admin(claims): Admin,
    state: web::Data<AppState>,
    draft: web::Json<NotificationDraft>,
) -> AppResult<HttpResponse> {
    state
        .notifications
        .create
        .handle(create::Input {
            draft: draft.into_inner(),
            sender: Some(claims.sub),
        })
        .await?
        .let_(presenters::notification::create)
        .let_(Ok)
}
