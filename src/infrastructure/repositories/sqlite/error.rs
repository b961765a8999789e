// src/infrastructure/repositories/sqlite/error.rs

use crate::domain::error::DomainError;
use diesel::r2d2;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DieselError),

    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Bookmark not found with ID: {0}")]
    BookmarkNotFound(i32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Repository operation failed: {0}")]
    OperationFailed(String),
}

pub type SqliteResult<T> = Result<T, SqliteRepositoryError>;

impl From<r2d2::Error> for SqliteRepositoryError {
    fn from(err: r2d2::Error) -> Self {
        SqliteRepositoryError::ConnectionPoolError(err.to_string())
    }
}

impl From<SqliteRepositoryError> for DomainError {
    fn from(err: SqliteRepositoryError) -> Self {
        match err {
            SqliteRepositoryError::BookmarkNotFound(id) => {
                DomainError::BookmarkNotFound(id.to_string())
            }
            SqliteRepositoryError::DatabaseError(diesel_err) => match diesel_err {
                DieselError::NotFound => {
                    DomainError::BookmarkNotFound("Resource not found".to_string())
                }
                DieselError::DatabaseError(
                    kind @ (DatabaseErrorKind::UniqueViolation
                    | DatabaseErrorKind::ForeignKeyViolation),
                    info,
                ) => DomainError::ConstraintViolation(format!("{:?}: {}", kind, info.message())),
                DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                    DomainError::StoreUnavailable(info.message().to_string())
                }
                DieselError::DatabaseError(_, info) => {
                    DomainError::RepositoryError(format!("Database error: {}", info.message()))
                }
                DieselError::BrokenTransactionManager | DieselError::AlreadyInTransaction => {
                    DomainError::StoreUnavailable(format!("Transaction error: {}", diesel_err))
                }
                _ => DomainError::RepositoryError(format!("Database error: {}", diesel_err)),
            },
            SqliteRepositoryError::ConnectionPoolError(e) => {
                DomainError::StoreUnavailable(format!("Connection pool error: {}", e))
            }
            SqliteRepositoryError::IoError(e) => DomainError::Io(e),
            SqliteRepositoryError::MigrationError(e) => {
                DomainError::StoreUnavailable(format!("Migration error: {}", e))
            }
            SqliteRepositoryError::OperationFailed(e) => DomainError::RepositoryError(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_not_found_when_convert_then_bookmark_not_found() {
        let err: DomainError = SqliteRepositoryError::BookmarkNotFound(7).into();
        assert!(matches!(err, DomainError::BookmarkNotFound(ref id) if id == "7"));
    }

    #[test]
    fn given_pool_error_when_convert_then_store_unavailable() {
        let err: DomainError =
            SqliteRepositoryError::ConnectionPoolError("timed out".to_string()).into();
        assert!(matches!(err, DomainError::StoreUnavailable(_)));
    }

    #[test]
    fn given_rollback_marker_when_convert_then_repository_error() {
        let err: DomainError = SqliteRepositoryError::DatabaseError(DieselError::RollbackTransaction).into();
        assert!(matches!(err, DomainError::RepositoryError(_)));
    }
}
