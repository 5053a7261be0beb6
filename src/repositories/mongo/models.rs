use serde_json::Value;

use crate::entities::Portfolio;

#[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
pub struct MongoMessageModel {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub reply_message: Option<String>,
    pub replied_at: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
pub struct MongoProjectModel {
    pub id: String,
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
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// The portfolio collection holds one document, keyed by [`PORTFOLIO_KEY`].
#[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
pub struct MongoPortfolioModel {
    pub key: String,
    pub profile: Portfolio,
}

pub const PORTFOLIO_KEY: &str = "owner";

#[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
pub struct MongoNotificationModel {
    pub id: String,
    pub recipient: String,
    pub sender: Option<String>,
    pub kind: String,
    pub message: String,
    pub read: bool,
    pub related_id: Option<String>,
    pub on_model: Option<String>,
    pub data: Value,
    pub created_at: String,
    pub updated_at: String,
}
