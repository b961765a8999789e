// src/infrastructure/di/service_container.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::services::tag_service::TagService;
use crate::application::{BookmarkServiceImpl, TagServiceImpl};
use crate::config::Settings;
use crate::domain::error::DomainError;
use crate::infrastructure::repositories::pinboard_import_repository::PinboardImportRepository;
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub bookmark_service: Arc<dyn BookmarkService>,
    pub tag_service: Arc<dyn TagService>,
}

impl ServiceContainer {
    /// Open the configured database and wire services to it.
    ///
    /// Fails if the database file does not exist; `create-db` makes one.
    #[instrument(skip_all, level = "debug", fields(db_url = %config.db_url))]
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        if !Path::new(&config.db_url).exists() {
            return Err(ApplicationError::Other(format!(
                "Database not found at '{}'. Set BLAND_DB_URL or run 'bland create-db <path>'",
                config.db_url
            )));
        }
        let repository =
            SqliteBookmarkRepository::from_url(&config.db_url).map_err(DomainError::from)?;
        Ok(Self::from_repository(repository))
    }

    /// Wire services around an already opened repository.
    pub fn from_repository(repository: SqliteBookmarkRepository) -> Self {
        debug!("Wiring services");
        let bookmark_repository = Arc::new(repository);

        let bookmark_service = Arc::new(BookmarkServiceImpl::new(
            bookmark_repository.clone(),
            Arc::new(PinboardImportRepository::new()),
        ));
        let tag_service = Arc::new(TagServiceImpl::new(bookmark_repository.clone()));

        Self {
            bookmark_service,
            tag_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::BookmarkDraft;
    use crate::infrastructure::repositories::sqlite::connection::init_pool;

    #[test]
    fn given_missing_database_when_new_then_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            db_url: dir.path().join("absent.db").to_string_lossy().to_string(),
        };

        let err = ServiceContainer::new(&settings).err().unwrap();
        assert!(!err.is_internal());
        assert!(err.to_string().contains("Database not found"));
    }

    #[test]
    fn given_existing_database_when_new_then_services_share_store() {
        let dir = tempfile::tempdir().unwrap();
        let db_url = dir.path().join("bland.db").to_string_lossy().to_string();
        init_pool(&db_url).unwrap();

        let container = ServiceContainer::new(&Settings { db_url }).unwrap();
        let draft = BookmarkDraft::builder()
            .url("https://example.com")
            .tags("shared")
            .build()
            .unwrap();
        container.bookmark_service.add_bookmark(&draft).unwrap();

        assert_eq!(container.tag_service.get_all_tags().unwrap().len(), 1);
    }
}
