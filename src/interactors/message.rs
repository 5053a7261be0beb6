use alloc::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::message_err_fmt;
use crate::entities::MessageStatus;
use crate::errors::{AppError, AppResult};
use crate::repositories::{MessageRepository, Page};
use crate::usecases::message::{delete, edit, get, gets, submit, MessageMutation};
use crate::utils::{AlsoChain, LetChain};
use crate::validation::validate_message;

pub struct MessageSubmitInteractor {
    pub message_repository: Arc<dyn MessageRepository + Sync + Send>,
}
#[async_trait]
impl submit::Usecase for MessageSubmitInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(
        &self,
        submit::Input { draft, ip_address }: submit::Input,
    ) -> AppResult<submit::Output> {
        let message = draft.into_message(ip_address, Utc::now());
        validate_message(&message)?;

        self.message_repository
            .insert(message.clone())
            .await
            .map_err(message_err_fmt)?;

        tracing::info!("message {} received", message.id);

        Ok(submit::Output { message })
    }
}

pub struct MessageGetsInteractor {
    pub message_repository: Arc<dyn MessageRepository + Sync + Send>,
}
#[async_trait]
impl gets::Usecase for MessageGetsInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, gets::Input { query }: gets::Input) -> AppResult<gets::Output> {
        let paging = query.paging;

        let Page { items, total } = self
            .message_repository
            .finds(query)
            .await
            .map_err(message_err_fmt)?;

        tracing::trace!("output - {} of {}", items.len(), total);

        Ok(gets::Output {
            messages: items,
            total,
            paging,
        })
    }
}

pub struct MessageGetInteractor {
    pub message_repository: Arc<dyn MessageRepository + Sync + Send>,
}
#[async_trait]
impl get::Usecase for MessageGetInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, get::Input { message_id }: get::Input) -> AppResult<get::Output> {
        self.message_repository
            .find(message_id)
            .await
            .map_err(message_err_fmt)?
            .let_(|message| get::Output { message })
            .let_(Ok)
    }
}

pub struct MessageEditInteractor {
    pub message_repository: Arc<dyn MessageRepository + Sync + Send>,
}
#[async_trait]
impl edit::Usecase for MessageEditInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(
        &self,
        edit::Input {
            message_id,
            mutation: MessageMutation {
                status,
                reply_message,
            },
        }: edit::Input,
    ) -> AppResult<edit::Output> {
        if status.is_none() && reply_message.is_none() {
            return Err(AppError::bad_request("Provide a status or a reply message"));
        }

        let now = Utc::now();

        let message = self
            .message_repository
            .find(message_id)
            .await
            .map_err(message_err_fmt)?
            .also_(|m| {
                if let Some(reply) = reply_message {
                    m.reply_message = Some(reply.trim().to_string());
                    m.replied_at = Some(now);
                    m.status = MessageStatus::Replied;
                }
                if let Some(status) = status {
                    m.status = status;
                }
                m.updated_at = now;
            });

        if matches!(&message.reply_message, Some(r) if r.is_empty()) {
            return Err(AppError::bad_request("Reply message cannot be empty"));
        }
        validate_message(&message)?;

        self.message_repository
            .update(message)
            .await
            .map_err(message_err_fmt)?
            .let_(|message| edit::Output { message })
            .let_(Ok)
    }
}

pub struct MessageDeleteInteractor {
    pub message_repository: Arc<dyn MessageRepository + Sync + Send>,
}
#[async_trait]
impl delete::Usecase for MessageDeleteInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, delete::Input { message_id }: delete::Input) -> AppResult<delete::Output> {
        self.message_repository
            .delete(message_id)
            .await
            .map_err(message_err_fmt)?
            .let_(|message| delete::Output { message })
            .let_(Ok)
    }
}
