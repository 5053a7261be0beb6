use async_trait::async_trait;
use tokio::sync::Mutex;

use self::helpers::{compare_messages, find_mut, find_ref, paginate, remove_one};
use super::{
    duplicate_key_message, MessageQuery, MessageRepository, NotificationQuery,
    NotificationRepository, Page, PortfolioRepository, ProjectQuery, ProjectRepository,
    RepositoryError, Result,
};
use crate::entities::{
    Message, MessageId, NotificationId, Portfolio, Project, ProjectId, UserId, UserNotification,
};

mod helpers;

/// Process-local store used when no database is configured and in tests.
pub struct InMemoryRepository<T>(Mutex<Vec<T>>);

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self { Self(Mutex::new(vec![])) }
}
impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self { Self::new() }
}

fn slug_taken(items: &[Project], slug: &str, except: Option<ProjectId>) -> Result<()> {
    match items
        .iter()
        .any(|p| p.slug == slug && Some(p.id) != except)
    {
        true => Err(RepositoryError::Duplicate(duplicate_key_message(
            "projects", "slug", slug,
        ))),
        false => Ok(()),
    }
}

#[async_trait]
impl ProjectRepository for InMemoryRepository<Project> {
    async fn insert(&self, item: Project) -> Result<()> {
        let mut guard = self.0.lock().await;

        slug_taken(&guard, &item.slug, None)?;

        guard.push(item);
        Ok(())
    }

    async fn find(&self, id: ProjectId) -> Result<Project> {
        let guard = self.0.lock().await;

        Ok(find_ref(&guard[..], |p| p.id == id)?.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Project> {
        let guard = self.0.lock().await;

        Ok(find_ref(&guard[..], |p| p.slug == slug)?.clone())
    }

    async fn finds(&self, ProjectQuery { featured }: ProjectQuery) -> Result<Vec<Project>> {
        let mut res = self
            .0
            .lock()
            .await
            .iter()
            .filter(|p| featured.map(|f| p.featured == f).unwrap_or(true))
            .cloned()
            .collect::<Vec<_>>();

        res.sort_by(|a, b| a.order.cmp(&b.order).then(b.created_at.cmp(&a.created_at)));

        Ok(res)
    }

    async fn update(&self, item: Project) -> Result<Project> {
        let mut guard = self.0.lock().await;

        slug_taken(&guard, &item.slug, Some(item.id))?;

        let stored = find_mut(&mut guard[..], |p| p.id == item.id)?;
        *stored = item;

        Ok(stored.clone())
    }

    async fn delete(&self, id: ProjectId) -> Result<Project> {
        let mut guard = self.0.lock().await;

        remove_one(&mut *guard, |p| p.id == id)
    }
}

#[async_trait]
impl MessageRepository for InMemoryRepository<Message> {
    async fn insert(&self, item: Message) -> Result<()> {
        self.0.lock().await.push(item);

        Ok(())
    }

    async fn find(&self, id: MessageId) -> Result<Message> {
        let guard = self.0.lock().await;

        Ok(find_ref(&guard[..], |m| m.id == id)?.clone())
    }

    async fn finds(
        &self,
        MessageQuery {
            status,
            sort,
            paging,
        }: MessageQuery,
    ) -> Result<Page<Message>> {
        let mut res = self
            .0
            .lock()
            .await
            .iter()
            .filter(|m| status.map(|s| m.status == s).unwrap_or(true))
            .cloned()
            .collect::<Vec<_>>();

        res.sort_by(compare_messages(sort));

        Ok(paginate(res, paging))
    }

    async fn update(&self, item: Message) -> Result<Message> {
        let mut guard = self.0.lock().await;

        let stored = find_mut(&mut guard[..], |m| m.id == item.id)?;
        *stored = item;

        Ok(stored.clone())
    }

    async fn delete(&self, id: MessageId) -> Result<Message> {
        let mut guard = self.0.lock().await;

        remove_one(&mut *guard, |m| m.id == id)
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryRepository<Portfolio> {
    async fn find(&self) -> Result<Portfolio> {
        let guard = self.0.lock().await;

        Ok(find_ref(&guard[..], |_| true)?.clone())
    }

    async fn upsert(&self, item: Portfolio) -> Result<Portfolio> {
        let mut guard = self.0.lock().await;

        guard.clear();
        guard.push(item.clone());

        Ok(item)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryRepository<UserNotification> {
    async fn insert(&self, item: UserNotification) -> Result<()> {
        self.0.lock().await.push(item);

        Ok(())
    }

    async fn finds(
        &self,
        NotificationQuery {
            recipient,
            unread_only,
            paging,
        }: NotificationQuery,
    ) -> Result<Page<UserNotification>> {
        let mut res = self
            .0
            .lock()
            .await
            .iter()
            .filter(|n| n.recipient == recipient)
            .filter(|n| !unread_only || !n.read)
            .cloned()
            .collect::<Vec<_>>();

        res.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(paginate(res, paging))
    }

    async fn count_unread(&self, recipient: UserId) -> Result<u64> {
        let guard = self.0.lock().await;

        Ok(guard
            .iter()
            .filter(|n| n.recipient == recipient && !n.read)
            .count() as u64)
    }

    async fn mark_read(&self, id: NotificationId, recipient: UserId) -> Result<UserNotification> {
        let mut guard = self.0.lock().await;

        let item = find_mut(&mut guard[..], |n| n.id == id && n.recipient == recipient)?;
        if !item.read {
            item.read = true;
            item.updated_at = chrono::Utc::now();
        }

        Ok(item.clone())
    }

    async fn mark_all_read(&self, recipient: UserId) -> Result<u64> {
        let mut guard = self.0.lock().await;
        let now = chrono::Utc::now();

        let mut changed = 0;
        for n in guard
            .iter_mut()
            .filter(|n| n.recipient == recipient && !n.read)
        {
            n.read = true;
            n.updated_at = now;
            changed += 1;
        }

        Ok(changed)
    }
}
