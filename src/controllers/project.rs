use actix_web::{web, HttpResponse};

use super::Admin;
use crate::constructors::AppState;
use crate::entities::{ProjectDraft, ProjectId, ProjectMutation};
use crate::errors::AppResult;
use crate::presenters;
use crate::repositories::ProjectQuery;
use crate::usecases::project::{create, delete, edit, get, gets, ProjectKey};
use crate::utils::LetChain;

#[derive(Debug, Default, ::serde::Deserialize)]
pub struct ListParams {
    pub featured: Option<bool>,
}

pub async fn gets(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let query = ProjectQuery {
        featured: params.featured,
    };

    state
        .projects
        .gets
        .handle(gets::Input { query })
        .await?
        .let_(presenters::project::gets)
        .let_(Ok)
}

pub async fn get(state: web::Data<AppState>, key: web::Path<String>) -> AppResult<HttpResponse> {
    let key = ProjectKey::from(key.as_str());

    state
        .projects
        .get
        .handle(get::Input { key })
        .await?
        .let_(presenters::project::get)
        .let_(Ok)
}

pub async fn create(
    _: Admin,
    state: web::Data<AppState>,
    draft: web::Json<ProjectDraft>,
) -> AppResult<HttpResponse> {
    state
        .projects
        .create
        .handle(create::Input {
            draft: draft.into_inner(),
        })
        .await?
        .let_(presenters::project::create)
        .let_(Ok)
}

pub async fn edit(
    _: Admin,
    state: web::Data<AppState>,
    project_id: web::Path<ProjectId>,
    mutation: web::Json<ProjectMutation>,
) -> AppResult<HttpResponse> {
    state
        .projects
        .edit
        .handle(edit::Input {
            project_id: project_id.into_inner(),
            mutation: mutation.into_inner(),
        })
        .await?
        .let_(presenters::project::edit)
        .let_(Ok)
}

pub async fn delete(
    _: Admin,
    state: web::Data<AppState>,
    project_id: web::Path<ProjectId>,
) -> AppResult<HttpResponse> {
    state
        .projects
        .delete
        .handle(delete::Input {
            project_id: project_id.into_inner(),
        })
        .await?
        .let_(presenters::project::delete)
        .let_(Ok)
}
