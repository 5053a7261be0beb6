use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::repositories::RepositoryError;

pub type AppResult<T> = ::core::result::Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field that failed validation, in the order it was checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn errors(&self) -> &[FieldError] { &self.0 }

    pub fn fields(&self) -> Vec<&'static str> { self.0.iter().map(|e| e.field).collect() }

    pub fn messages(&self) -> Vec<&str> { self.0.iter().map(|e| e.message.as_str()).collect() }

    pub fn into_result(self) -> Result<(), Self> {
        match self.is_empty() {
            true => Ok(()),
            false => Err(self),
        }
    }
}

impl ::std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(f, "{}", self.messages().join(". "))
    }
}

impl ::std::error::Error for ValidationErrors {}

/// Everything a request can fail with.
///
/// `Operational` errors carry a message meant for the client. The other
/// recognised shapes are rewritten into operational ones by [`crate::middleware`]
/// in production mode; `Internal` is never shown to clients there.
#[derive(Debug)]
pub enum AppError {
    Operational { status: StatusCode, message: String },
    InvalidToken,
    TokenExpired,
    /// Store-level uniqueness violation, holding the store's own message.
    Duplicate(String),
    Validation(ValidationErrors),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Operational {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    pub fn unauthorized(message: impl Into<String>) -> Self { Self::new(StatusCode::UNAUTHORIZED, message) }

    pub fn forbidden(message: impl Into<String>) -> Self { Self::new(StatusCode::FORBIDDEN, message) }

    pub fn not_found(message: impl Into<String>) -> Self { Self::new(StatusCode::NOT_FOUND, message) }

    /// Status the error carries before any normalization.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Operational { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_operational(&self) -> bool { matches!(self, Self::Operational { .. }) }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Operational { .. } => "AppError",
            Self::InvalidToken => "JsonWebTokenError",
            Self::TokenExpired => "TokenExpiredError",
            Self::Duplicate(_) => "DuplicateKeyError",
            Self::Validation(_) => "ValidationError",
            Self::Internal(_) => "Error",
        }
    }
}

impl ::std::fmt::Display for AppError {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        match self {
            Self::Operational { message, .. } => write!(f, "{}", message),
            Self::InvalidToken => write!(f, "invalid token"),
            Self::TokenExpired => write!(f, "jwt expired"),
            Self::Duplicate(message) => write!(f, "{}", message),
            Self::Validation(errs) => write!(f, "validation failed: {}", errs),
            Self::Internal(e) => write!(f, "{}", e),
        }
    }
}

impl ::std::error::Error for AppError {}

impl From<ValidationErrors> for AppError {
    fn from(errs: ValidationErrors) -> Self { Self::Validation(errs) }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self { Self::Internal(e) }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::not_found("No document found with that ID"),
            RepositoryError::Duplicate(message) => Self::Duplicate(message),
            e @ RepositoryError::NoUnique { .. } => Self::Internal(anyhow::anyhow!(e)),
            RepositoryError::Internal(e) => Self::Internal(e),
        }
    }
}

/// Renders in production mode. The normalization middleware re-renders
/// according to the configured mode, so this only shows when it is absent.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        crate::middleware::normalize(self, crate::config::Mode::Production).status
    }

    fn error_response(&self) -> HttpResponse {
        crate::middleware::render(self, crate::config::Mode::Production)
    }
}
