use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use mongodb::bson::{doc, Document};

use super::models::{MongoMessageModel, MongoNotificationModel, MongoProjectModel};
use crate::entities::{
    Message, NotificationKind, NotificationTarget, Project, UserNotification,
};
use crate::repositories::{MessageQuery, MessageSort, ProjectQuery};
use crate::utils::{parse_stamp, stamp};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(raw: &str) -> ::anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).with_context(|| format!("bad date `{}`", raw))
}

impl From<Message> for MongoMessageModel {
    fn from(
        Message {
            id,
            name,
            email,
            subject,
            message,
            status,
            reply_message,
            replied_at,
            ip_address,
            created_at,
            updated_at,
        }: Message,
    ) -> Self {
        Self {
            id: id.to_string(),
            name,
            email,
            subject,
            message,
            status: status.as_str().to_string(),
            reply_message,
            replied_at: replied_at.as_ref().map(stamp),
            ip_address,
            created_at: stamp(&created_at),
            updated_at: stamp(&updated_at),
        }
    }
}

impl TryFrom<MongoMessageModel> for Message {
    type Error = anyhow::Error;

    fn try_from(m: MongoMessageModel) -> ::anyhow::Result<Self> {
        Ok(Self {
            id: m.id.parse()?,
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            status: m.status.parse().map_err(|e: String| anyhow!(e))?,
            reply_message: m.reply_message,
            replied_at: m.replied_at.as_deref().map(parse_stamp).transpose()?,
            ip_address: m.ip_address,
            created_at: parse_stamp(&m.created_at)?,
            updated_at: parse_stamp(&m.updated_at)?,
        })
    }
}

impl From<Project> for MongoProjectModel {
    fn from(p: Project) -> Self {
        Self {
            id: p.id.to_string(),
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
            completed_at: p.completed_at.map(|d| d.format(DATE_FORMAT).to_string()),
            created_at: stamp(&p.created_at),
            updated_at: stamp(&p.updated_at),
        }
    }
}

impl TryFrom<MongoProjectModel> for Project {
    type Error = anyhow::Error;

    fn try_from(m: MongoProjectModel) -> ::anyhow::Result<Self> {
        Ok(Self {
            id: m.id.parse()?,
            title: m.title,
            slug: m.slug,
            description: m.description,
            long_description: m.long_description,
            technologies: m.technologies,
            tags: m.tags,
            image_url: m.image_url,
            github_url: m.github_url,
            live_url: m.live_url,
            featured: m.featured,
            order: m.order,
            color: m.color,
            completed_at: m.completed_at.as_deref().map(parse_date).transpose()?,
            created_at: parse_stamp(&m.created_at)?,
            updated_at: parse_stamp(&m.updated_at)?,
        })
    }
}

fn kind_name(kind: NotificationKind) -> ::anyhow::Result<String> {
    match serde_json::to_value(kind)? {
        serde_json::Value::String(s) => Ok(s),
        other => Err(anyhow!("unexpected notification kind encoding: {}", other)),
    }
}

impl TryFrom<UserNotification> for MongoNotificationModel {
    type Error = anyhow::Error;

    fn try_from(n: UserNotification) -> ::anyhow::Result<Self> {
        Ok(Self {
            id: n.id.to_string(),
            recipient: n.recipient.to_string(),
            sender: n.sender.map(|s| s.to_string()),
            kind: kind_name(n.kind)?,
            message: n.message,
            read: n.read,
            related_id: n.target.map(|t| t.related_id().to_string()),
            on_model: n.target.map(|t| t.model_name().to_string()),
            data: n.data,
            created_at: stamp(&n.created_at),
            updated_at: stamp(&n.updated_at),
        })
    }
}

impl TryFrom<MongoNotificationModel> for UserNotification {
    type Error = anyhow::Error;

    fn try_from(m: MongoNotificationModel) -> ::anyhow::Result<Self> {
        let target = match (m.related_id, m.on_model) {
            (Some(id), Some(model)) => Some(
                NotificationTarget::from_parts(&model, id.parse()?)
                    .ok_or_else(|| anyhow!("unknown reference model `{}`", model))?,
            ),
            _ => None,
        };

        Ok(Self {
            id: m.id.parse()?,
            recipient: m.recipient.parse()?,
            sender: m.sender.as_deref().map(str::parse).transpose()?,
            kind: serde_json::from_value(serde_json::Value::String(m.kind))?,
            message: m.message,
            read: m.read,
            target,
            data: m.data,
            created_at: parse_stamp(&m.created_at)?,
            updated_at: parse_stamp(&m.updated_at)?,
        })
    }
}

impl From<ProjectQuery> for Document {
    fn from(ProjectQuery { featured }: ProjectQuery) -> Self {
        let mut query = doc! {};

        if let Some(val) = featured {
            query.insert("featured", val);
        }

        query
    }
}

impl From<&MessageQuery> for Document {
    fn from(MessageQuery { status, .. }: &MessageQuery) -> Self {
        let mut query = doc! {};

        if let Some(val) = status {
            query.insert("status", val.as_str());
        }

        query
    }
}

impl From<MessageSort> for Document {
    fn from(MessageSort { field, descending }: MessageSort) -> Self {
        let dir = match descending {
            true => -1,
            false => 1,
        };

        let key = field.field_name();
        doc! { key: dir }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::entities::{MessageDraft, NotificationDraft, ProjectDraft, TrackId, UserId};

    #[test]
    fn project_model_round_trips_dates() {
        let p = ProjectDraft {
            title: "Dated".to_string(),
            description: "d".to_string(),
            completed_at: NaiveDate::from_ymd_opt(2024, 2, 29),
            ..Default::default()
        }
        .into_project(Utc::now());

        let m = MongoProjectModel::from(p.clone());
        assert_eq!(m.completed_at.as_deref(), Some("2024-02-29"));

        let back = Project::try_from(m).unwrap();
        assert_eq!(back.completed_at, p.completed_at);
        assert_eq!(back.slug, "dated");
    }

    #[test]
    fn message_model_keeps_status_text() {
        let m = MessageDraft {
            name: "A".to_string(),
            email: "a@example.com".to_string(),
            subject: "s".to_string(),
            message: "0123456789".to_string(),
        }
        .into_message(None, Utc::now());

        let model = MongoMessageModel::from(m);
        assert_eq!(model.status, "new");
        assert!(Message::try_from(model).is_ok());
    }

    #[test]
    fn notification_model_splits_target() {
        let track = TrackId::generate();
        let n = NotificationDraft {
            recipient: UserId::generate(),
            kind: crate::entities::NotificationKind::NewTrack,
            message: "new track".to_string(),
            related_id: None,
            on_model: None,
            data: Some(json!({ "title": "Song" })),
        }
        .into_notification(Some(NotificationTarget::Track(track)), None, Utc::now());

        let m = MongoNotificationModel::try_from(n.clone()).unwrap();
        assert_eq!(m.kind, "new_track");
        assert_eq!(m.on_model.as_deref(), Some("Track"));
        assert_eq!(m.related_id, Some(track.to_string()));

        assert_eq!(UserNotification::try_from(m).unwrap().target, n.target);
    }

    #[test]
    fn sort_document_uses_model_field() {
        let d: Document = MessageSort::default().into();
        assert_eq!(d, doc! { "created_at": -1 });
    }
}
