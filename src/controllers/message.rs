use actix_web::{web, HttpRequest, HttpResponse};

use super::Admin;
use crate::constructors::AppState;
use crate::entities::{MessageDraft, MessageId, MessageStatus};
use crate::errors::{AppError, AppResult};
use crate::presenters;
use crate::repositories::{MessageQuery, MessageSort, Paging};
use crate::usecases::message::{delete, edit, get, gets, submit, MessageMutation};
use crate::utils::LetChain;

pub async fn submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    draft: web::Json<MessageDraft>,
) -> AppResult<HttpResponse> {
    let ip_address = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);

    state
        .messages
        .submit
        .handle(submit::Input {
            draft: draft.into_inner(),
            ip_address,
        })
        .await?
        .let_(presenters::message::submit)
        .let_(Ok)
}

#[derive(Debug, Default, ::serde::Deserialize)]
pub struct ListParams {
    pub status: Option<MessageStatus>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    fn into_query(self) -> AppResult<MessageQuery> {
        let sort = match self.sort.as_deref() {
            Some(raw) => raw.parse::<MessageSort>().map_err(AppError::bad_request)?,
            None => MessageSort::default(),
        };

        Ok(MessageQuery {
            status: self.status,
            sort,
            paging: Paging::new(self.page, self.limit),
        })
    }
}

pub async fn gets(
    _: Admin,
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let query = params.into_inner().into_query()?;

    state
        .messages
        .gets
        .handle(gets::Input { query })
        .await?
        .let_(presenters::message::gets)
        .let_(Ok)
}

pub async fn get(
    _: Admin,
    state: web::Data<AppState>,
    message_id: web::Path<MessageId>,
) -> AppResult<HttpResponse> {
    state
        .messages
        .get
        .handle(get::Input {
            message_id: message_id.into_inner(),
        })
        .await?
        .let_(presenters::message::get)
        .let_(Ok)
}

pub async fn edit(
    _: Admin,
    state: web::Data<AppState>,
    message_id: web::Path<MessageId>,
    mutation: web::Json<MessageMutation>,
) -> AppResult<HttpResponse> {
    state
        .messages
        .edit
        .handle(edit::Input {
            message_id: message_id.into_inner(),
            mutation: mutation.into_inner(),
        })
        .await?
        .let_(presenters::message::edit)
        .let_(Ok)
}

pub async fn delete(
    _: Admin,
    state: web::Data<AppState>,
    message_id: web::Path<MessageId>,
) -> AppResult<HttpResponse> {
    state
        .messages
        .delete
        .handle(delete::Input {
            message_id: message_id.into_inner(),
        })
        .await?
        .let_(presenters::message::delete)
        .let_(Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MessageSortField;

    #[test]
    fn params_default_to_newest_first() {
        let q = ListParams::default().into_query().unwrap();

        assert_eq!(q.sort, MessageSort::default());
        assert_eq!(q.paging, Paging::default());
    }

    #[test]
    fn params_parse_sort() {
        let q = ListParams {
            sort: Some("subject".to_string()),
            ..Default::default()
        }
        .into_query()
        .unwrap();

        assert_eq!(q.sort.field, MessageSortField::Subject);
        assert!(!q.sort.descending);
    }

    #[test]
    fn unknown_sort_is_a_client_error() {
        let err = ListParams {
            sort: Some("-ip".to_string()),
            ..Default::default()
        }
        .into_query()
        .unwrap_err();

        assert!(err.is_operational());
    }
}
