use std::cmp::Ordering;
use std::fmt::Debug;

use super::super::{MessageSort, MessageSortField, Page, Paging, RepositoryError, Result as RepoResult};
use crate::entities::Message;
use crate::utils::LetChain;

/// The single element of `found`, or the lookup error its size implies.
fn exactly_one<T: Debug>(mut found: Vec<T>) -> RepoResult<T> {
    tracing::trace!("matched {} - {:?}", found.len(), found);

    match found.len() {
        0 => Err(RepositoryError::NotFound),
        1 => Ok(found.swap_remove(0)),
        n => Err(RepositoryError::NoUnique { matched: n as u32 }),
    }
}

pub fn find_mut<T: Debug>(v: &mut [T], is_target: impl Fn(&T) -> bool) -> RepoResult<&mut T> {
    v.iter_mut()
        .filter(|t| is_target(t))
        .collect::<Vec<_>>()
        .let_(exactly_one)
}

pub fn find_ref<T: Debug>(v: &[T], is_target: impl Fn(&T) -> bool) -> RepoResult<&T> {
    v.iter()
        .filter(|t| is_target(t))
        .collect::<Vec<_>>()
        .let_(exactly_one)
}

pub fn remove_one<T>(v: &mut Vec<T>, is_target: impl Fn(&T) -> bool) -> RepoResult<T> {
    let index = v
        .iter()
        .enumerate()
        .filter(|(_, t)| is_target(t))
        .map(|(i, _)| i)
        .collect::<Vec<_>>()
        .let_(exactly_one)?;

    Ok(v.remove(index))
}

pub fn paginate<T>(mut items: Vec<T>, paging: Paging) -> Page<T> {
    let total = items.len() as u64;
    let items = items
        .drain(..)
        .skip(paging.skip() as usize)
        .take(paging.limit as usize)
        .collect();

    Page { items, total }
}

pub fn compare_messages(sort: MessageSort) -> impl Fn(&Message, &Message) -> Ordering {
    move |a, b| {
        let ord = match sort.field {
            MessageSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            MessageSortField::Name => a.name.cmp(&b.name),
            MessageSortField::Status => a.status.as_str().cmp(b.status.as_str()),
            MessageSortField::Subject => a.subject.cmp(&b.subject),
        };

        match sort.descending {
            true => ord.reverse(),
            false => ord,
        }
    }
}
