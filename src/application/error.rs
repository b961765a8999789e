// src/application/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Bookmark not found with ID {0}")]
    BookmarkNotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::Validation(msg) => {
                ApplicationError::Validation(format!("{}: {}", context.into(), msg))
            }
            err => ApplicationError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    /// Store-level failures. The CLI reports these as "operation failed"
    /// and logs the detail at debug level.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(
                DomainError::ConstraintViolation(_)
                    | DomainError::StoreUnavailable(_)
                    | DomainError::RepositoryError(_)
                    | DomainError::Io(_)
                    | DomainError::Other(_)
            )
        )
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Domain(DomainError::Io(err))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_store_failure_when_classified_then_internal() {
        let err = ApplicationError::from(DomainError::StoreUnavailable("pool".to_string()));
        assert!(err.is_internal());
        assert!(!ApplicationError::BookmarkNotFound(1).is_internal());
        assert!(!ApplicationError::Validation("url".to_string()).is_internal());
        assert!(!ApplicationError::Other("Database not found".to_string()).is_internal());
    }

    #[test]
    fn given_validation_error_when_context_then_prefixed() {
        let err = ApplicationError::Validation("bad url".to_string()).context("add");
        assert_eq!(err.to_string(), "Validation failed: add: bad url");
    }
}
