//! UI-facing state. Every operation records failures in `error` instead of
//! returning them, and local data only changes after the remote call
//! succeeded.

use super::services::{AuthService, ProjectService};
use super::{ClientResult, Credentials};
use crate::entities::{ProjectDraft, ProjectId, ProjectMutation, Role, User};
use crate::presenters::views::ProjectView;

/// Runs `op` with `loading` raised, storing its error.
macro_rules! tracked {
    ($s:ident, $op:expr) => {{
        $s.loading = true;
        $s.error = None;

        let res: ClientResult<_> = $op;

        $s.loading = false;
        match res {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!("store call failed: {}", e);
                $s.error = Some(e.message);
                None
            },
        }
    }};
}

pub struct ProjectsStore<S> {
    service: S,
    pub projects: Vec<ProjectView>,
    pub current: Option<ProjectView>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<S: ProjectService + Sync> ProjectsStore<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            projects: vec![],
            current: None,
            loading: false,
            error: None,
        }
    }

    /// Replaces the list with the server's.
    pub async fn fetch(&mut self, creds: &mut Credentials, featured: Option<bool>) -> bool {
        if let Some(projects) = tracked!(self, self.service.list(creds, featured).await) {
            self.projects = projects;
            return true;
        }
        false
    }

    pub async fn open(&mut self, creds: &mut Credentials, key: &str) -> bool {
        if let Some(project) = tracked!(self, self.service.get(creds, key).await) {
            self.current = Some(project);
            return true;
        }
        false
    }

    pub async fn create(&mut self, creds: &mut Credentials, draft: &ProjectDraft) -> Option<ProjectView> {
        let project = tracked!(self, self.service.create(creds, draft).await)?;
        self.projects.push(project.clone());

        Some(project)
    }

    pub async fn update(
        &mut self,
        creds: &mut Credentials,
        id: ProjectId,
        mutation: &ProjectMutation,
    ) -> Option<ProjectView> {
        let project = tracked!(self, self.service.update(creds, id, mutation).await)?;

        for p in self.projects.iter_mut().filter(|p| p.id == id) {
            *p = project.clone();
        }
        if matches!(&self.current, Some(c) if c.id == id) {
            self.current = Some(project.clone());
        }

        Some(project)
    }

    pub async fn remove(&mut self, creds: &mut Credentials, id: ProjectId) -> bool {
        if tracked!(self, self.service.delete(creds, id).await).is_none() {
            return false;
        }

        self.projects.retain(|p| p.id != id);
        if matches!(&self.current, Some(c) if c.id == id) {
            self.current = None;
        }
        true
    }
}

/// Owns the credentials every other store borrows.
pub struct AuthStore<S> {
    service: S,
    pub credentials: Credentials,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<S: AuthService + Sync> AuthStore<S> {
    pub fn new(service: S, credentials: Credentials) -> Self {
        Self {
            service,
            credentials,
            user: None,
            loading: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool { self.user.is_some() && self.credentials.is_signed_in() }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && matches!(&self.user, Some(u) if u.role == Role::Admin)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let creds = &mut self.credentials;
        if let Some(user) = tracked!(self, self.service.login(creds, email, password).await) {
            self.user = Some(user);
            return true;
        }
        false
    }

    /// Loads the user behind stored credentials. A rejected token is
    /// dropped by the service, leaving the store signed out.
    pub async fn restore(&mut self) -> bool {
        if !self.credentials.is_signed_in() {
            return false;
        }

        let creds = &mut self.credentials;
        match tracked!(self, self.service.me(creds).await) {
            Some(user) => {
                self.user = Some(user);
                true
            },
            None => {
                self.user = None;
                false
            },
        }
    }

    pub async fn logout(&mut self) {
        let creds = &mut self.credentials;
        tracked!(self, self.service.logout(creds).await);
        self.user = None;
    }
}
