use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::validation::slugify;

macro_rules! id_type {
    ($( $n:ident ),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            #[derive(::serde::Serialize, ::serde::Deserialize)]
            #[serde(transparent)]
            pub struct $n(pub Uuid);

            impl $n {
                pub fn generate() -> Self { Self(Uuid::new_v4()) }
            }

            impl From<Uuid> for $n {
                fn from(id: Uuid) -> Self { Self(id) }
            }

            impl ::core::str::FromStr for $n {
                type Err = ::uuid::Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> { Uuid::parse_str(s).map(Self) }
            }

            impl ::core::fmt::Display for $n {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

id_type!(MessageId, ProjectId, NotificationId, UserId, TrackId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl MessageStatus {
    pub const ALL: [MessageStatus; 4] = [Self::New, Self::Read, Self::Replied, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }
}

impl Default for MessageStatus {
    fn default() -> Self { Self::New }
}

impl ::core::str::FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|st| st.as_str() == s)
            .copied()
            .ok_or_else(|| format!("`{}` is not a valid message status", s))
    }
}

/// Inbound contact message.
///
/// Status may move between any of its four values; a reply is recorded
/// alongside `replied` by the reply path but not required by the type.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    pub reply_message: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl MessageDraft {
    pub fn into_message(self, ip_address: Option<String>, now: DateTime<Utc>) -> Message {
        let MessageDraft {
            name,
            email,
            subject,
            message,
        } = self;

        Message {
            id: MessageId::generate(),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
            status: MessageStatus::New,
            reply_message: None,
            replied_at: None,
            ip_address,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub long_description: Option<String>,
    pub technologies: Vec<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub order: i32,
    pub color: String,
    pub completed_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_PROJECT_COLOR: &str = "#3b82f6";

/// Fields a client may supply when creating a project. There is no slug
/// field; the slug always follows the title.
#[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub long_description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
    pub color: Option<String>,
    pub completed_at: Option<NaiveDate>,
}

impl ProjectDraft {
    pub fn into_project(self, now: DateTime<Utc>) -> Project {
        let title = self.title.trim().to_string();

        Project {
            id: ProjectId::generate(),
            slug: slugify(&title),
            title,
            description: self.description.trim().to_string(),
            long_description: self.long_description,
            technologies: trim_all(self.technologies),
            tags: trim_all(self.tags),
            image_url: self.image_url,
            github_url: self.github_url,
            live_url: self.live_url,
            featured: self.featured,
            order: self.order,
            color: self
                .color
                .unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
            completed_at: self.completed_at,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMutation {
    pub title: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: Option<bool>,
    pub order: Option<i32>,
    pub color: Option<String>,
    pub completed_at: Option<NaiveDate>,
}

impl Project {
    /// Applies `mutation`, recomputing the slug when the title changed.
    pub fn apply(mut self, mutation: ProjectMutation, now: DateTime<Utc>) -> Project {
        let ProjectMutation {
            title,
            description,
            long_description,
            technologies,
            tags,
            image_url,
            github_url,
            live_url,
            featured,
            order,
            color,
            completed_at,
        } = mutation;

        if let Some(title) = title.map(|t| t.trim().to_string()) {
            if title != self.title {
                self.slug = slugify(&title);
                self.title = title;
            }
        }
        if let Some(val) = description {
            self.description = val.trim().to_string();
        }
        if let Some(val) = long_description {
            self.long_description = Some(val);
        }
        if let Some(val) = technologies {
            self.technologies = trim_all(val);
        }
        if let Some(val) = tags {
            self.tags = trim_all(val);
        }
        if let Some(val) = image_url {
            self.image_url = Some(val);
        }
        if let Some(val) = github_url {
            self.github_url = Some(val);
        }
        if let Some(val) = live_url {
            self.live_url = Some(val);
        }
        if let Some(val) = featured {
            self.featured = val;
        }
        if let Some(val) = order {
            self.order = val;
        }
        if let Some(val) = color {
            self.color = val;
        }
        if let Some(val) = completed_at {
            self.completed_at = Some(val);
        }

        self.updated_at = now;
        self
    }
}

fn trim_all(mut v: Vec<String>) -> Vec<String> {
    v.drain(..)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub resume_url: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    /// Percent, inclusive on both ends.
    pub level: i32,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Follow,
    Like,
    Comment,
    NewTrack,
    Mention,
    System,
}

/// What a notification points at. Each variant names the collection its id
/// resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(::serde::Serialize, ::serde::Deserialize)]
#[serde(tag = "onModel", content = "relatedId")]
pub enum NotificationTarget {
    User(UserId),
    Track(TrackId),
}

impl NotificationTarget {
    pub fn model_name(&self) -> &'static str {
        match self {
            Self::User(_) => "User",
            Self::Track(_) => "Track",
        }
    }

    pub fn related_id(&self) -> Uuid {
        match self {
            Self::User(UserId(id)) | Self::Track(TrackId(id)) => *id,
        }
    }

    pub fn from_parts(model: &str, related_id: Uuid) -> Option<Self> {
        match model {
            "User" => Some(Self::User(UserId(related_id))),
            "Track" => Some(Self::Track(TrackId(related_id))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserNotification {
    pub id: NotificationId,
    pub recipient: UserId,
    pub sender: Option<UserId>,
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    pub target: Option<NotificationTarget>,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    pub recipient: UserId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub message: String,
    pub related_id: Option<Uuid>,
    pub on_model: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl NotificationDraft {
    /// `target` is the already resolved `relatedId`/`onModel` pair.
    pub fn into_notification(
        self,
        target: Option<NotificationTarget>,
        sender: Option<UserId>,
        now: DateTime<Utc>,
    ) -> UserNotification {
        UserNotification {
            id: NotificationId::generate(),
            recipient: self.recipient,
            sender,
            kind: self.kind,
            message: self.message.trim().to_string(),
            read: false,
            target,
            data: self.data.unwrap_or_else(|| Value::Object(Default::default())),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}
