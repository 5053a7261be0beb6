use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    Message, MessageId, MessageStatus, NotificationId, NotificationKind, Project, ProjectId, UserId,
    UserNotification,
};
use crate::utils::stamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: ProjectId,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    pub technologies: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    pub featured: bool,
    pub order: i32,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Project> for ProjectView {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            title: p.title,
            slug: p.slug,
            description: p.description,
            long_description: p.long_description,
            technologies: p.technologies,
            tags: p.tags,
            image_url: p.image_url,
            github_url: p.github_url,
            live_url: p.live_url,
            featured: p.featured,
            order: p.order,
            color: p.color,
            completed_at: p.completed_at.map(|d| d.to_string()),
            created_at: stamp(&p.created_at),
            updated_at: stamp(&p.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Message> for MessageView {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            status: m.status,
            reply_message: m.reply_message,
            replied_at: m.replied_at.as_ref().map(stamp),
            ip_address: m.ip_address,
            created_at: stamp(&m.created_at),
            updated_at: stamp(&m.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: NotificationId,
    pub recipient: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<UserId>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_model: Option<&'static str>,
    pub data: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserNotification> for NotificationView {
    fn from(n: UserNotification) -> Self {
        Self {
            id: n.id,
            recipient: n.recipient,
            sender: n.sender,
            kind: n.kind,
            message: n.message,
            read: n.read,
            related_id: n.target.map(|t| t.related_id()),
            on_model: n.target.map(|t| t.model_name()),
            data: n.data,
            created_at: stamp(&n.created_at),
            updated_at: stamp(&n.updated_at),
        }
    }
}

pub(crate) fn view_all<T, V: From<T>>(mut items: Vec<T>) -> Vec<V> { items.drain(..).map(V::from).collect() }
