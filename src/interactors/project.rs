use alloc::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::project_err_fmt;
use crate::errors::AppResult;
use crate::repositories::ProjectRepository;
use crate::usecases::project::{create, delete, edit, get, gets, ProjectKey};
use crate::utils::LetChain;
use crate::validation::validate_project;

pub struct ProjectGetsInteractor {
    pub project_repository: Arc<dyn ProjectRepository + Sync + Send>,
}
#[async_trait]
impl gets::Usecase for ProjectGetsInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, gets::Input { query }: gets::Input) -> AppResult<gets::Output> {
        tracing::trace!("query - {:?}", query);

        self.project_repository
            .finds(query)
            .await
            .map_err(project_err_fmt)?
            .let_(|projects| gets::Output { projects })
            .let_(Ok)
    }
}

pub struct ProjectGetInteractor {
    pub project_repository: Arc<dyn ProjectRepository + Sync + Send>,
}
#[async_trait]
impl get::Usecase for ProjectGetInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, get::Input { key }: get::Input) -> AppResult<get::Output> {
        let res = match key {
            ProjectKey::Id(id) => self.project_repository.find(id).await,
            ProjectKey::Slug(slug) => self.project_repository.find_by_slug(&slug).await,
        };

        res.map_err(project_err_fmt)?
            .let_(|project| get::Output { project })
            .let_(Ok)
    }
}

pub struct ProjectCreateInteractor {
    pub project_repository: Arc<dyn ProjectRepository + Sync + Send>,
}
#[async_trait]
impl create::Usecase for ProjectCreateInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, create::Input { draft }: create::Input) -> AppResult<create::Output> {
        let project = draft.into_project(Utc::now());
        validate_project(&project)?;

        tracing::trace!("slug - {}", project.slug);

        self.project_repository
            .insert(project.clone())
            .await
            .map_err(project_err_fmt)?;

        Ok(create::Output { project })
    }
}

pub struct ProjectEditInteractor {
    pub project_repository: Arc<dyn ProjectRepository + Sync + Send>,
}
#[async_trait]
impl edit::Usecase for ProjectEditInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(
        &self,
        edit::Input {
            project_id,
            mutation,
        }: edit::Input,
    ) -> AppResult<edit::Output> {
        let project = self
            .project_repository
            .find(project_id)
            .await
            .map_err(project_err_fmt)?
            .apply(mutation, Utc::now());

        validate_project(&project)?;

        self.project_repository
            .update(project)
            .await
            .map_err(project_err_fmt)?
            .let_(|project| edit::Output { project })
            .let_(Ok)
    }
}

pub struct ProjectDeleteInteractor {
    pub project_repository: Arc<dyn ProjectRepository + Sync + Send>,
}
#[async_trait]
impl delete::Usecase for ProjectDeleteInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, delete::Input { project_id }: delete::Input) -> AppResult<delete::Output> {
        self.project_repository
            .delete(project_id)
            .await
            .map_err(project_err_fmt)?
            .let_(|project| delete::Output { project })
            .let_(Ok)
    }
}
