use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;

use super::views::{view_all, ProjectView};
use super::{no_content, Envelope};
use crate::usecases::project::{create, delete, edit, get, gets};

pub fn gets(gets::Output { projects }: gets::Output) -> HttpResponse {
    let projects: Vec<ProjectView> = view_all(projects);

    Envelope::success(json!({ "projects": projects }))
        .results(projects.len())
        .respond(StatusCode::OK)
}

pub fn get(get::Output { project }: get::Output) -> HttpResponse {
    Envelope::success(json!({ "project": ProjectView::from(project) })).respond(StatusCode::OK)
}

pub fn create(create::Output { project }: create::Output) -> HttpResponse {
    Envelope::success(json!({ "project": ProjectView::from(project) })).respond(StatusCode::CREATED)
}

pub fn edit(edit::Output { project }: edit::Output) -> HttpResponse {
    Envelope::success(json!({ "project": ProjectView::from(project) })).respond(StatusCode::OK)
}

pub fn delete(_: delete::Output) -> HttpResponse { no_content() }
