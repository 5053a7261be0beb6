pub mod auth;
pub mod message;
pub mod notification;
pub mod portfolio;
pub mod project;

use crate::errors::AppError;
use crate::repositories::RepositoryError;

fn project_err_fmt(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::not_found("No project found with that ID or slug"),
        e => e.into(),
    }
}

fn message_err_fmt(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::not_found("No message found with that ID"),
        e => e.into(),
    }
}

fn portfolio_err_fmt(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::not_found("Portfolio has not been set up yet"),
        e => e.into(),
    }
}

fn notification_err_fmt(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::not_found("No notification found with that ID"),
        e => e.into(),
    }
}
