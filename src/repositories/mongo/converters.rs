use anyhow::anyhow;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use super::{RepositoryError, Result as RepoResult};

const DUPLICATE_KEY: i32 = 11000;

pub fn convert_repo_err<T, E>(result: Result<T, E>) -> RepoResult<T>
where E: Sync + Send + ::std::error::Error + 'static {
    result.map_err(|e| RepositoryError::Internal(anyhow!(e)))
}

pub fn convert_conversion_err<T>(result: ::anyhow::Result<T>) -> RepoResult<T> {
    result.map_err(RepositoryError::Internal)
}

/// Turns a unique index violation into [`RepositoryError::Duplicate`],
/// keeping the server's message.
pub fn try_unique_check<T>(result: Result<T, MongoError>) -> RepoResult<T> {
    let e = match result {
        Ok(t) => return Ok(t),
        Err(e) => e,
    };

    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY =>
            Err(RepositoryError::Duplicate(we.message.clone())),
        _ => Err(RepositoryError::Internal(anyhow!(e))),
    }
}

pub fn convert_404_or<T>(option: Option<T>) -> RepoResult<T> {
    match option {
        Some(t) => Ok(t),
        None => Err(RepositoryError::NotFound),
    }
}

pub fn expect_matched(matched: u64) -> RepoResult<()> {
    match matched {
        0 => Err(RepositoryError::NotFound),
        1 => Ok(()),
        i => Err(RepositoryError::NoUnique { matched: i as u32 }),
    }
}
