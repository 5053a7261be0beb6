use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;

use super::views::{view_all, NotificationView};
use super::{Envelope, Pagination};
use crate::usecases::notification::{create, gets, mark_all_read, mark_read, unread_count};

pub fn gets(
    gets::Output {
        notifications,
        total,
        unread,
        paging,
    }: gets::Output,
) -> HttpResponse {
    let notifications: Vec<NotificationView> = view_all(notifications);

    Envelope::success(json!({ "notifications": notifications, "unreadCount": unread }))
        .results(notifications.len())
        .pagination(Pagination::new(paging, total))
        .respond(StatusCode::OK)
}

pub fn unread_count(unread_count::Output { count }: unread_count::Output) -> HttpResponse {
    Envelope::success(json!({ "count": count })).respond(StatusCode::OK)
}

pub fn mark_read(mark_read::Output { notification }: mark_read::Output) -> HttpResponse {
    Envelope::success(json!({ "notification": NotificationView::from(notification) }))
        .respond(StatusCode::OK)
}

pub fn mark_all_read(mark_all_read::Output { modified }: mark_all_read::Output) -> HttpResponse {
    Envelope::success(json!({ "modified": modified })).respond(StatusCode::OK)
}

pub fn create(create::Output { notification }: create::Output) -> HttpResponse {
    Envelope::success(json!({ "notification": NotificationView::from(notification) }))
        .respond(StatusCode::CREATED)
}
