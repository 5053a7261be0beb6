use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{data_field, ClientError, ClientResult, Credentials, Transport};
use crate::entities::{MessageDraft, MessageId, MessageStatus, ProjectDraft, ProjectId, ProjectMutation, User};
use crate::presenters::views::{MessageView, ProjectView};
use crate::presenters::Pagination;
use crate::usecases::message::MessageMutation;

const NO_BODY: Option<&()> = None;

#[async_trait]
pub trait AuthService {
    /// Stores the issued token in `creds` on success.
    async fn login(&self, creds: &mut Credentials, email: &str, password: &str) -> ClientResult<User>;

    /// Always forgets the local token, even when the server is unreachable.
    async fn logout(&self, creds: &mut Credentials) -> ClientResult<()>;

    async fn me(&self, creds: &mut Credentials) -> ClientResult<User>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageListQuery {
    pub status: Option<MessageStatus>,
    /// `field` or `-field`.
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessagePage {
    pub messages: Vec<MessageView>,
    pub pagination: Pagination,
}

#[async_trait]
pub trait ContactService {
    /// Returns the server's acknowledgement text.
    async fn send(&self, creds: &mut Credentials, draft: &MessageDraft) -> ClientResult<String>;

    async fn messages(&self, creds: &mut Credentials, query: &MessageListQuery) -> ClientResult<MessagePage>;

    async fn message(&self, creds: &mut Credentials, id: MessageId) -> ClientResult<MessageView>;

    async fn update_message(
        &self,
        creds: &mut Credentials,
        id: MessageId,
        mutation: &MessageMutation,
    ) -> ClientResult<MessageView>;

    async fn delete_message(&self, creds: &mut Credentials, id: MessageId) -> ClientResult<()>;
}

#[async_trait]
pub trait ProjectService {
    async fn list(&self, creds: &mut Credentials, featured: Option<bool>) -> ClientResult<Vec<ProjectView>>;

    /// `key` is an id or a slug.
    async fn get(&self, creds: &mut Credentials, key: &str) -> ClientResult<ProjectView>;

    async fn create(&self, creds: &mut Credentials, draft: &ProjectDraft) -> ClientResult<ProjectView>;

    async fn update(
        &self,
        creds: &mut Credentials,
        id: ProjectId,
        mutation: &ProjectMutation,
    ) -> ClientResult<ProjectView>;

    async fn delete(&self, creds: &mut Credentials, id: ProjectId) -> ClientResult<()>;
}

/// The services over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    transport: Transport,
}

impl HttpApi {
    pub fn new(base: &str) -> ClientResult<Self> {
        Ok(Self {
            transport: Transport::new(base)?,
        })
    }

    async fn expect_body<B: ::serde::Serialize + ?Sized + Sync>(
        &self,
        creds: &mut Credentials,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> ClientResult<Value> {
        self.transport
            .call(creds, method, path, body, fallback)
            .await?
            .ok_or_else(|| ClientError::new(None, fallback))
    }

    /// Path below the base with every segment percent-encoded as a path
    /// segment, so `/` or spaces in a key stay inside it.
    fn segments_path(&self, segments: &[&str]) -> ClientResult<String> {
        let base = self.transport.base();
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::new(None, format!("`{}` cannot take a path", base)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url.path()[base.path().len()..].to_string())
    }
}

#[async_trait]
impl AuthService for HttpApi {
    async fn login(&self, creds: &mut Credentials, email: &str, password: &str) -> ClientResult<User> {
        const FALLBACK: &str = "Login failed";

        let body = json!({ "email": email, "password": password });
        let res = self
            .expect_body(creds, Method::POST, "auth/login", Some(&body), FALLBACK)
            .await?;

        let token = res
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::new(None, FALLBACK))?;

        let user = data_field(res, "user", FALLBACK)?;
        creds.set(token);

        Ok(user)
    }

    async fn logout(&self, creds: &mut Credentials) -> ClientResult<()> {
        let res = self
            .transport
            .call(creds, Method::POST, "auth/logout", NO_BODY, "Logout failed")
            .await;
        creds.clear();

        res.map(|_| ())
    }

    async fn me(&self, creds: &mut Credentials) -> ClientResult<User> {
        const FALLBACK: &str = "Failed to load user";

        let res = self
            .expect_body(creds, Method::GET, "auth/me", NO_BODY, FALLBACK)
            .await?;

        data_field(res, "user", FALLBACK)
    }
}

#[async_trait]
impl ContactService for HttpApi {
    async fn send(&self, creds: &mut Credentials, draft: &MessageDraft) -> ClientResult<String> {
        const FALLBACK: &str = "Failed to send message";

        let res = self
            .expect_body(creds, Method::POST, "contact", Some(draft), FALLBACK)
            .await?;

        Ok(res
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Message sent")
            .to_string())
    }

    async fn messages(&self, creds: &mut Credentials, query: &MessageListQuery) -> ClientResult<MessagePage> {
        const FALLBACK: &str = "Failed to fetch messages";

        let qs = message_query_string(query);
        let res = self
            .expect_body(creds, Method::GET, &format!("contact/messages{}", qs), NO_BODY, FALLBACK)
            .await?;

        let pagination = res
            .get("pagination")
            .cloned()
            .and_then(|p| serde_json::from_value(p).ok())
            .ok_or_else(|| ClientError::new(None, FALLBACK))?;
        let messages = data_field(res, "messages", FALLBACK)?;

        Ok(MessagePage {
            messages,
            pagination,
        })
    }

    async fn message(&self, creds: &mut Credentials, id: MessageId) -> ClientResult<MessageView> {
        const FALLBACK: &str = "Failed to fetch message";

        let res = self
            .expect_body(creds, Method::GET, &format!("contact/messages/{}", id), NO_BODY, FALLBACK)
            .await?;

        data_field(res, "message", FALLBACK)
    }

    async fn update_message(
        &self,
        creds: &mut Credentials,
        id: MessageId,
        mutation: &MessageMutation,
    ) -> ClientResult<MessageView> {
        const FALLBACK: &str = "Failed to update message";

        let res = self
            .expect_body(
                creds,
                Method::PUT,
                &format!("contact/messages/{}", id),
                Some(mutation),
                FALLBACK,
            )
            .await?;

        data_field(res, "message", FALLBACK)
    }

    async fn delete_message(&self, creds: &mut Credentials, id: MessageId) -> ClientResult<()> {
        self.transport
            .call(
                creds,
                Method::DELETE,
                &format!("contact/messages/{}", id),
                NO_BODY,
                "Failed to delete message",
            )
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl ProjectService for HttpApi {
    async fn list(&self, creds: &mut Credentials, featured: Option<bool>) -> ClientResult<Vec<ProjectView>> {
        const FALLBACK: &str = "Failed to fetch projects";

        let path = match featured {
            Some(f) => format!("projects?featured={}", f),
            None => "projects".to_string(),
        };
        let res = self
            .expect_body(creds, Method::GET, &path, NO_BODY, FALLBACK)
            .await?;

        data_field(res, "projects", FALLBACK)
    }

    async fn get(&self, creds: &mut Credentials, key: &str) -> ClientResult<ProjectView> {
        const FALLBACK: &str = "Failed to fetch project";

        let path = self.segments_path(&["projects", key])?;
        let res = self
            .expect_body(creds, Method::GET, &path, NO_BODY, FALLBACK)
            .await?;

        data_field(res, "project", FALLBACK)
    }

    async fn create(&self, creds: &mut Credentials, draft: &ProjectDraft) -> ClientResult<ProjectView> {
        const FALLBACK: &str = "Failed to create project";

        let res = self
            .expect_body(creds, Method::POST, "projects", Some(draft), FALLBACK)
            .await?;

        data_field(res, "project", FALLBACK)
    }

    async fn update(
        &self,
        creds: &mut Credentials,
        id: ProjectId,
        mutation: &ProjectMutation,
    ) -> ClientResult<ProjectView> {
        const FALLBACK: &str = "Failed to update project";

        let res = self
            .expect_body(creds, Method::PUT, &format!("projects/{}", id), Some(mutation), FALLBACK)
            .await?;

        data_field(res, "project", FALLBACK)
    }

    async fn delete(&self, creds: &mut Credentials, id: ProjectId) -> ClientResult<()> {
        self.transport
            .call(
                creds,
                Method::DELETE,
                &format!("projects/{}", id),
                NO_BODY,
                "Failed to delete project",
            )
            .await
            .map(|_| ())
    }
}

/// `?a=1&b=2`, or nothing when every field is absent.
fn message_query_string(query: &MessageListQuery) -> String {
    let mut ser = url::form_urlencoded::Serializer::new(String::new());

    if let Some(status) = query.status {
        ser.append_pair("status", status.as_str());
    }
    if let Some(sort) = &query.sort {
        ser.append_pair("sort", sort);
    }
    if let Some(page) = query.page {
        ser.append_pair("page", &page.to_string());
    }
    if let Some(limit) = query.limit {
        ser.append_pair("limit", &limit.to_string());
    }

    match ser.finish() {
        s if s.is_empty() => s,
        s => format!("?{}", s),
    }
}
