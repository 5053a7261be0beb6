use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;

use super::views::{view_all, MessageView};
use super::{no_content, Envelope, Pagination};
use crate::usecases::message::{delete, edit, get, gets, submit};

/// The sender only learns that the message arrived.
pub fn submit(submit::Output { message }: submit::Output) -> HttpResponse {
    Envelope::success(json!({ "id": message.id }))
        .message("Thank you for your message! I'll get back to you soon.")
        .respond(StatusCode::CREATED)
}

pub fn gets(
    gets::Output {
        messages,
        total,
        paging,
    }: gets::Output,
) -> HttpResponse {
    let messages: Vec<MessageView> = view_all(messages);

    Envelope::success(json!({ "messages": messages }))
        .results(messages.len())
        .pagination(Pagination::new(paging, total))
        .respond(StatusCode::OK)
}

pub fn get(get::Output { message }: get::Output) -> HttpResponse {
    Envelope::success(json!({ "message": MessageView::from(message) })).respond(StatusCode::OK)
}

pub fn edit(edit::Output { message }: edit::Output) -> HttpResponse {
    Envelope::success(json!({ "message": MessageView::from(message) })).respond(StatusCode::OK)
}

pub fn delete(_: delete::Output) -> HttpResponse { no_content() }
