// src/cli/error.rs
use crate::application::error::ApplicationError;
use crate::domain::error::DomainError;
use crate::infrastructure::repositories::sqlite::error::SqliteRepositoryError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::CommandFailed(msg) => {
                CliError::CommandFailed(format!("{}: {}", context.into(), msg))
            }
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Application(err) => CliError::Application(err.context(context)),
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, CliError::Application(err) if err.is_internal())
    }

    /// Message shown to the user. Store failures are reported opaquely,
    /// their detail goes to the debug log only.
    pub fn user_message(&self) -> String {
        if self.is_internal() {
            "operation failed".to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Application(ApplicationError::Domain(err))
    }
}

impl From<SqliteRepositoryError> for CliError {
    fn from(err: SqliteRepositoryError) -> Self {
        CliError::Application(ApplicationError::Domain(err.into()))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other(format!("JSON output failed: {}", err))
    }
}

pub type CliResult<T> = Result<T, CliError>;
