use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReplaceOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use tracing::Instrument;

use self::converters::{
    convert_404_or, convert_conversion_err, convert_repo_err, expect_matched, try_unique_check,
};
use self::helpers::{get_many, get_one, get_page, initialize_coll, IndexSpec, UNIQUE_ID};
use self::models::{
    MongoMessageModel, MongoNotificationModel, MongoPortfolioModel, MongoProjectModel,
    PORTFOLIO_KEY,
};
use super::{
    MessageQuery, MessageRepository, NotificationQuery, NotificationRepository, Page, Paging,
    PortfolioRepository, ProjectQuery, ProjectRepository, RepositoryError, Result,
};
use crate::entities::{
    Message, MessageId, NotificationId, Portfolio, Project, ProjectId, UserId, UserNotification,
};
use crate::utils::{stamp, LetChain};

mod converters;
mod helpers;
mod models;
mod type_convert;

const PROJECTS: &str = "projects";
const MESSAGES: &str = "messages";
const PORTFOLIOS: &str = "portfolios";
const NOTIFICATIONS: &str = "usernotifications";

pub async fn connect(uri: impl AsRef<str>, db_name: impl AsRef<str>) -> ::anyhow::Result<Database> {
    let c = Client::with_uri_str(uri)
        .instrument(tracing::trace_span!("with_uri_str"))
        .await?;

    Ok(c.database(db_name.as_ref()))
}

pub struct MongoProjectRepository {
    coll: Collection<MongoProjectModel>,
}

impl MongoProjectRepository {
    pub async fn new_with(db: &Database) -> ::anyhow::Result<Self> {
        initialize_coll(
            PROJECTS,
            &[UNIQUE_ID, IndexSpec {
                name: "slug_1",
                keys: &[("slug", 1)],
                unique: true,
            }],
            db,
        )
        .await?;

        Ok(Self {
            coll: db.collection(PROJECTS),
        })
    }
}

#[async_trait]
impl ProjectRepository for MongoProjectRepository {
    async fn insert(&self, item: Project) -> Result<()> {
        let model: MongoProjectModel = item.into();

        self.coll
            .insert_one(model, None)
            .instrument(tracing::trace_span!("insert_one"))
            .await
            .let_(try_unique_check)?;

        Ok(())
    }

    async fn find(&self, id: ProjectId) -> Result<Project> {
        get_one(&self.coll, doc! { "id": id.to_string() })
            .await?
            .let_(Project::try_from)
            .let_(convert_conversion_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Project> {
        get_one(&self.coll, doc! { "slug": slug })
            .await?
            .let_(Project::try_from)
            .let_(convert_conversion_err)
    }

    async fn finds(&self, query: ProjectQuery) -> Result<Vec<Project>> {
        let options = FindOptions::builder()
            .sort(doc! { "order": 1, "created_at": -1 })
            .build();

        get_many(&self.coll, query.into(), options)
            .await?
            .drain(..)
            .map(Project::try_from)
            .collect::<::anyhow::Result<Vec<_>>>()
            .let_(convert_conversion_err)
    }

    async fn update(&self, item: Project) -> Result<Project> {
        let id = item.id.to_string();
        let model: MongoProjectModel = item.clone().into();

        self.coll
            .replace_one(doc! { "id": id }, model, None)
            .instrument(tracing::trace_span!("replace_one"))
            .await
            .let_(try_unique_check)?
            .matched_count
            .let_(expect_matched)?;

        Ok(item)
    }

    async fn delete(&self, id: ProjectId) -> Result<Project> {
        self.coll
            .find_one_and_delete(doc! { "id": id.to_string() }, None)
            .instrument(tracing::trace_span!("find_one_and_delete"))
            .await
            .let_(convert_repo_err)?
            .let_(convert_404_or)?
            .let_(Project::try_from)
            .let_(convert_conversion_err)
    }
}

pub struct MongoMessageRepository {
    coll: Collection<MongoMessageModel>,
}

impl MongoMessageRepository {
    pub async fn new_with(db: &Database) -> ::anyhow::Result<Self> {
        initialize_coll(
            MESSAGES,
            &[UNIQUE_ID, IndexSpec {
                name: "status_created_at",
                keys: &[("status", 1), ("created_at", -1)],
                unique: false,
            }],
            db,
        )
        .await?;

        Ok(Self {
            coll: db.collection(MESSAGES),
        })
    }
}

#[async_trait]
impl MessageRepository for MongoMessageRepository {
    async fn insert(&self, item: Message) -> Result<()> {
        let model: MongoMessageModel = item.into();

        self.coll
            .insert_one(model, None)
            .instrument(tracing::trace_span!("insert_one"))
            .await
            .let_(try_unique_check)?;

        Ok(())
    }

    async fn find(&self, id: MessageId) -> Result<Message> {
        get_one(&self.coll, doc! { "id": id.to_string() })
            .await?
            .let_(Message::try_from)
            .let_(convert_conversion_err)
    }

    async fn finds(&self, query: MessageQuery) -> Result<Page<Message>> {
        let Page { mut items, total } =
            get_page(&self.coll, (&query).into(), query.sort.into(), query.paging).await?;

        let items = items
            .drain(..)
            .map(Message::try_from)
            .collect::<::anyhow::Result<Vec<_>>>()
            .let_(convert_conversion_err)?;

        Ok(Page { items, total })
    }

    async fn update(&self, item: Message) -> Result<Message> {
        let id = item.id.to_string();
        let model: MongoMessageModel = item.clone().into();

        self.coll
            .replace_one(doc! { "id": id }, model, None)
            .instrument(tracing::trace_span!("replace_one"))
            .await
            .let_(convert_repo_err)?
            .matched_count
            .let_(expect_matched)?;

        Ok(item)
    }

    async fn delete(&self, id: MessageId) -> Result<Message> {
        self.coll
            .find_one_and_delete(doc! { "id": id.to_string() }, None)
            .instrument(tracing::trace_span!("find_one_and_delete"))
            .await
            .let_(convert_repo_err)?
            .let_(convert_404_or)?
            .let_(Message::try_from)
            .let_(convert_conversion_err)
    }
}

pub struct MongoPortfolioRepository {
    coll: Collection<MongoPortfolioModel>,
}

impl MongoPortfolioRepository {
    pub async fn new_with(db: &Database) -> ::anyhow::Result<Self> {
        initialize_coll(
            PORTFOLIOS,
            &[IndexSpec {
                name: "unique_key",
                keys: &[("key", 1)],
                unique: true,
            }],
            db,
        )
        .await?;

        Ok(Self {
            coll: db.collection(PORTFOLIOS),
        })
    }
}

#[async_trait]
impl PortfolioRepository for MongoPortfolioRepository {
    async fn find(&self) -> Result<Portfolio> {
        let MongoPortfolioModel { profile, .. } =
            get_one(&self.coll, doc! { "key": PORTFOLIO_KEY }).await?;

        Ok(profile)
    }

    async fn upsert(&self, item: Portfolio) -> Result<Portfolio> {
        let model = MongoPortfolioModel {
            key: PORTFOLIO_KEY.to_string(),
            profile: item.clone(),
        };

        self.coll
            .replace_one(
                doc! { "key": PORTFOLIO_KEY },
                model,
                ReplaceOptions::builder().upsert(true).build(),
            )
            .instrument(tracing::trace_span!("replace_one"))
            .await
            .let_(convert_repo_err)?;

        Ok(item)
    }
}

pub struct MongoNotificationRepository {
    coll: Collection<MongoNotificationModel>,
}

impl MongoNotificationRepository {
    pub async fn new_with(db: &Database) -> ::anyhow::Result<Self> {
        initialize_coll(
            NOTIFICATIONS,
            &[
                UNIQUE_ID,
                IndexSpec {
                    name: "recipient_created_at",
                    keys: &[("recipient", 1), ("created_at", -1)],
                    unique: false,
                },
                IndexSpec {
                    name: "recipient_read",
                    keys: &[("recipient", 1), ("read", 1)],
                    unique: false,
                },
            ],
            db,
        )
        .await?;

        Ok(Self {
            coll: db.collection(NOTIFICATIONS),
        })
    }
}

#[async_trait]
impl NotificationRepository for MongoNotificationRepository {
    async fn insert(&self, item: UserNotification) -> Result<()> {
        let model = MongoNotificationModel::try_from(item).let_(convert_conversion_err)?;

        self.coll
            .insert_one(model, None)
            .instrument(tracing::trace_span!("insert_one"))
            .await
            .let_(try_unique_check)?;

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
        let mut filter = doc! { "recipient": recipient.to_string() };
        if unread_only {
            filter.insert("read", false);
        }

        let Page { mut items, total } =
            get_page(&self.coll, filter, doc! { "created_at": -1 }, paging).await?;

        let items = items
            .drain(..)
            .map(UserNotification::try_from)
            .collect::<::anyhow::Result<Vec<_>>>()
            .let_(convert_conversion_err)?;

        Ok(Page { items, total })
    }

    async fn count_unread(&self, recipient: UserId) -> Result<u64> {
        self.coll
            .count_documents(doc! { "recipient": recipient.to_string(), "read": false }, None)
            .instrument(tracing::trace_span!("count_documents"))
            .await
            .let_(convert_repo_err)
    }

    async fn mark_read(&self, id: NotificationId, recipient: UserId) -> Result<UserNotification> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.coll
            .find_one_and_update(
                doc! { "id": id.to_string(), "recipient": recipient.to_string() },
                doc! { "$set": { "read": true, "updated_at": stamp(&chrono::Utc::now()) } },
                options,
            )
            .instrument(tracing::trace_span!("find_one_and_update"))
            .await
            .let_(convert_repo_err)?
            .let_(convert_404_or)?
            .let_(UserNotification::try_from)
            .let_(convert_conversion_err)
    }

    async fn mark_all_read(&self, recipient: UserId) -> Result<u64> {
        let res = self
            .coll
            .update_many(
                doc! { "recipient": recipient.to_string(), "read": false },
                doc! { "$set": { "read": true, "updated_at": stamp(&chrono::Utc::now()) } },
                None,
            )
            .instrument(tracing::trace_span!("update_many"))
            .await
            .let_(convert_repo_err)?;

        Ok(res.modified_count)
    }
}
