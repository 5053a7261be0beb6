use alloc::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::notification_err_fmt;
use crate::errors::AppResult;
use crate::repositories::{NotificationRepository, Page};
use crate::usecases::notification::{create, gets, mark_all_read, mark_read, unread_count};
use crate::utils::LetChain;
use crate::validation::{resolve_target, validate_notification};

pub struct NotificationGetsInteractor {
    pub notification_repository: Arc<dyn NotificationRepository + Sync + Send>,
}
#[async_trait]
impl gets::Usecase for NotificationGetsInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, gets::Input { query }: gets::Input) -> AppResult<gets::Output> {
        let recipient = query.recipient;
        let paging = query.paging;

        let Page { items, total } = self
            .notification_repository
            .finds(query)
            .await
            .map_err(notification_err_fmt)?;

        let unread = self
            .notification_repository
            .count_unread(recipient)
            .await
            .map_err(notification_err_fmt)?;

        Ok(gets::Output {
            notifications: items,
            total,
            unread,
            paging,
        })
    }
}

pub struct NotificationUnreadCountInteractor {
    pub notification_repository: Arc<dyn NotificationRepository + Sync + Send>,
}
#[async_trait]
impl unread_count::Usecase for NotificationUnreadCountInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(
        &self,
        unread_count::Input { recipient }: unread_count::Input,
    ) -> AppResult<unread_count::Output> {
        self.notification_repository
            .count_unread(recipient)
            .await
            .map_err(notification_err_fmt)?
            .let_(|count| unread_count::Output { count })
            .let_(Ok)
    }
}

pub struct NotificationMarkReadInteractor {
    pub notification_repository: Arc<dyn NotificationRepository + Sync + Send>,
}
#[async_trait]
impl mark_read::Usecase for NotificationMarkReadInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(
        &self,
        mark_read::Input {
            notification_id,
            recipient,
        }: mark_read::Input,
    ) -> AppResult<mark_read::Output> {
        self.notification_repository
            .mark_read(notification_id, recipient)
            .await
            .map_err(notification_err_fmt)?
            .let_(|notification| mark_read::Output { notification })
            .let_(Ok)
    }
}

pub struct NotificationMarkAllReadInteractor {
    pub notification_repository: Arc<dyn NotificationRepository + Sync + Send>,
}
#[async_trait]
impl mark_all_read::Usecase for NotificationMarkAllReadInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(
        &self,
        mark_all_read::Input { recipient }: mark_all_read::Input,
    ) -> AppResult<mark_all_read::Output> {
        let modified = self
            .notification_repository
            .mark_all_read(recipient)
            .await
            .map_err(notification_err_fmt)?;

        tracing::trace!("output - {} marked", modified);

        Ok(mark_all_read::Output { modified })
    }
}

pub struct NotificationCreateInteractor {
    pub notification_repository: Arc<dyn NotificationRepository + Sync + Send>,
}
#[async_trait]
impl create::Usecase for NotificationCreateInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, create::Input { draft, sender }: create::Input) -> AppResult<create::Output> {
        let target = resolve_target(&draft)?;
        let notification = draft.into_notification(target, sender, Utc::now());

        validate_notification(&notification)?;

        self.notification_repository
            .insert(notification.clone())
            .await
            .map_err(notification_err_fmt)?;

        Ok(create::Output { notification })
    }
}
