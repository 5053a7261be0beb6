use async_trait::async_trait;

use crate::entities::{
    Message, MessageId, MessageStatus, NotificationId, Portfolio, Project, ProjectId, UserId,
    UserNotification,
};

pub(crate) mod mock;
pub(crate) mod mongo;

pub use mock::InMemoryRepository;
pub use mongo::{
    MongoMessageRepository, MongoNotificationRepository, MongoPortfolioRepository,
    MongoProjectRepository,
};

type StdResult<T, E> = ::std::result::Result<T, E>;
pub type Result<T> = ::std::result::Result<T, RepositoryError>;

#[async_trait]
pub trait ProjectRepository {
    /// Fails with [`RepositoryError::Duplicate`] when the slug is taken.
    async fn insert(&self, item: Project) -> Result<()>;

    async fn find(&self, id: ProjectId) -> Result<Project>;
    async fn find_by_slug(&self, slug: &str) -> Result<Project>;
    async fn finds(&self, query: ProjectQuery) -> Result<Vec<Project>>;

    /// Replaces the stored project with the same id.
    async fn update(&self, item: Project) -> Result<Project>;

    async fn delete(&self, id: ProjectId) -> Result<Project>;
}

#[async_trait]
pub trait MessageRepository {
    async fn insert(&self, item: Message) -> Result<()>;

    async fn find(&self, id: MessageId) -> Result<Message>;
    async fn finds(&self, query: MessageQuery) -> Result<Page<Message>>;

    async fn update(&self, item: Message) -> Result<Message>;

    async fn delete(&self, id: MessageId) -> Result<Message>;
}

#[async_trait]
pub trait PortfolioRepository {
    async fn find(&self) -> Result<Portfolio>;

    /// Stores `item` as the one portfolio, creating it when absent.
    async fn upsert(&self, item: Portfolio) -> Result<Portfolio>;
}

#[async_trait]
pub trait NotificationRepository {
    async fn insert(&self, item: UserNotification) -> Result<()>;

    /// Newest first.
    async fn finds(&self, query: NotificationQuery) -> Result<Page<UserNotification>>;
    async fn count_unread(&self, recipient: UserId) -> Result<u64>;

    async fn mark_read(&self, id: NotificationId, recipient: UserId) -> Result<UserNotification>;
    async fn mark_all_read(&self, recipient: UserId) -> Result<u64>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectQuery {
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageQuery {
    pub status: Option<MessageStatus>,
    pub sort: MessageSort,
    pub paging: Paging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSortField {
    CreatedAt,
    Name,
    Status,
    Subject,
}

impl MessageSortField {
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Name => "name",
            Self::Status => "status",
            Self::Subject => "subject",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSort {
    pub field: MessageSortField,
    pub descending: bool,
}

impl Default for MessageSort {
    fn default() -> Self {
        Self {
            field: MessageSortField::CreatedAt,
            descending: true,
        }
    }
}

/// `createdAt` sorts ascending, `-createdAt` descending.
impl ::core::str::FromStr for MessageSort {
    type Err = String;

    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let field = match name {
            "createdAt" => MessageSortField::CreatedAt,
            "name" => MessageSortField::Name,
            "status" => MessageSortField::Status,
            "subject" => MessageSortField::Subject,
            other => return Err(format!("cannot sort messages by `{}`", other)),
        };

        Ok(Self { field, descending })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationQuery {
    pub recipient: UserId,
    pub unread_only: bool,
    pub paging: Paging,
}

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// One-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl Paging {
    /// Clamps out-of-range values instead of rejecting them.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn skip(&self) -> u64 { (self.page as u64 - 1) * self.limit as u64 }
}

impl Default for Paging {
    fn default() -> Self { Self::new(None, None) }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Debug)]
pub enum RepositoryError {
    NotFound,
    NoUnique { matched: u32 },
    /// Unique index violation; holds the store's message.
    Duplicate(String),
    Internal(anyhow::Error),
}

impl ::std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        match self {
            RepositoryError::NotFound => write!(f, "cannot find object."),
            RepositoryError::NoUnique { matched } => write!(
                f,
                "expected unique object, found non-unique objects (matched: {})",
                matched
            ),
            RepositoryError::Duplicate(message) => write!(f, "{}", message),
            RepositoryError::Internal(e) => write!(f, "internal error: {}", e),
        }
    }
}

impl ::std::error::Error for RepositoryError {}

/// The message a unique index violation produces, in the store's format.
pub(crate) fn duplicate_key_message(collection: &str, field: &str, value: &str) -> String {
    format!(
        "E11000 duplicate key error collection: {} index: {}_1 dup key: {{ {}: \"{}\" }}",
        collection, field, field, value
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("-createdAt", MessageSortField::CreatedAt, true)]
    #[case("createdAt", MessageSortField::CreatedAt, false)]
    #[case("name", MessageSortField::Name, false)]
    #[case("-status", MessageSortField::Status, true)]
    fn sort_parses(#[case] raw: &str, #[case] field: MessageSortField, #[case] descending: bool) {
        assert_eq!(raw.parse::<MessageSort>(), Ok(MessageSort { field, descending }));
    }

    #[test]
    fn unknown_sort_field_rejected() { assert!("-email".parse::<MessageSort>().is_err()); }

    #[test]
    fn paging_clamps() {
        assert_eq!(Paging::new(Some(0), Some(0)), Paging { page: 1, limit: 1 });
        assert_eq!(Paging::new(None, Some(1000)).limit, MAX_PAGE_LIMIT);
        assert_eq!(Paging::new(Some(3), Some(20)).skip(), 40);
    }

    #[test]
    fn duplicate_message_quotes_value() {
        let m = duplicate_key_message("projects", "slug", "hello-world");
        assert!(m.contains("dup key: { slug: \"hello-world\" }"));
    }
}
