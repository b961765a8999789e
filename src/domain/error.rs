// src/domain/error.rs
use crate::domain::draft::BookmarkDraftBuilderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    /// Unique or foreign key violation inside a write transaction.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation rejected: {0}")]
    ValidationRejected(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        let context = context.into();
        match self {
            DomainError::RepositoryError(msg) => {
                DomainError::RepositoryError(format!("{}: {}", context, msg))
            }
            DomainError::ImportFailed(msg) => {
                DomainError::ImportFailed(format!("{}: {}", context, msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context, msg)),
            err => err,
        }
    }

    /// True for errors that indicate a conflicting concurrent writer.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::ConstraintViolation(_))
    }
}

impl From<BookmarkDraftBuilderError> for DomainError {
    fn from(e: BookmarkDraftBuilderError) -> Self {
        DomainError::ValidationRejected(e.to_string())
    }
}
