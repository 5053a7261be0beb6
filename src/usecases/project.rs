usecase! {
    gets : {
        pub query: crate::repositories::ProjectQuery,
    } => {
        pub projects: Vec<entities::Project>,
    }
}

usecase! {
    get : {
        pub key: super::ProjectKey,
    } => {
        pub project: entities::Project,
    }
}

usecase! {
    create : {
        pub draft: entities::ProjectDraft,
    } => {
        pub project: entities::Project,
    }
}

usecase! {
    edit : {
        pub project_id: entities::ProjectId,
        pub mutation: entities::ProjectMutation,
    } => {
        pub project: entities::Project,
    }
}

usecase! {
    delete : {
        pub project_id: entities::ProjectId,
    } => {
        pub project: entities::Project,
    }
}

use crate::entities::ProjectId;

/// Path segment of `/projects/{id}`: a uuid addresses by id, anything else
/// by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectKey {
    Id(ProjectId),
    Slug(String),
}

impl From<&str> for ProjectKey {
    fn from(raw: &str) -> Self {
        match raw.parse::<ProjectId>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Slug(raw.to_string()),
        }
    }
}
