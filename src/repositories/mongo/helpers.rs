use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::Result as MongoResult;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use tracing::Instrument;

use super::converters::{convert_404_or, convert_repo_err};
use super::{Page, Paging, Result as RepoResult};
use crate::utils::LetChain;

/// Index spec for `createIndexes`; `keys` is a list of `(field, direction)`.
pub struct IndexSpec {
    pub name: &'static str,
    pub keys: &'static [(&'static str, i32)],
    pub unique: bool,
}

pub const UNIQUE_ID: IndexSpec = IndexSpec {
    name: "unique_id",
    keys: &[("id", 1)],
    unique: true,
};

pub async fn initialize_coll(
    coll_name: &str,
    indexes: &[IndexSpec],
    db: &Database,
) -> MongoResult<()> {
    let indexes = indexes
        .iter()
        .map(|IndexSpec { name, keys, unique }| {
            let mut key = Document::new();
            for (field, dir) in keys.iter() {
                key.insert(*field, *dir);
            }

            doc! { "name": *name, "key": key, "unique": *unique }
        })
        .collect::<Vec<_>>();

    db.run_command(
        doc! {
            "createIndexes": coll_name,
            "indexes": indexes,
        },
        None,
    )
    .instrument(tracing::trace_span!("run_command"))
    .await?;

    Ok(())
}

pub async fn get_one<T>(coll: &Collection<T>, filter: Document) -> RepoResult<T>
where T: Sync + Send + Unpin + ::serde::de::DeserializeOwned {
    coll.find_one(filter, None)
        .instrument(tracing::trace_span!("find_one"))
        .await
        .let_(convert_repo_err)?
        .let_(convert_404_or)
}

pub async fn get_many<T>(
    coll: &Collection<T>,
    filter: Document,
    options: impl Into<Option<FindOptions>>,
) -> RepoResult<Vec<T>>
where
    T: Sync + Send + Unpin + ::serde::de::DeserializeOwned,
{
    coll.find(filter, options)
        .instrument(tracing::trace_span!("find"))
        .await
        .let_(convert_repo_err)?
        .try_collect::<Vec<_>>()
        .instrument(tracing::trace_span!("try_collect"))
        .await
        .let_(convert_repo_err)
}

/// One page of `filter`, with the total count of matches.
pub async fn get_page<T>(
    coll: &Collection<T>,
    filter: Document,
    sort: Document,
    paging: Paging,
) -> RepoResult<Page<T>>
where
    T: Sync + Send + Unpin + ::serde::de::DeserializeOwned,
{
    let total = coll
        .count_documents(filter.clone(), None)
        .instrument(tracing::trace_span!("count_documents"))
        .await
        .let_(convert_repo_err)?;

    let options = FindOptions::builder()
        .sort(sort)
        .skip(paging.skip())
        .limit(paging.limit as i64)
        .build();
    let items = get_many(coll, filter, options).await?;

    Ok(Page { items, total })
}
