// src/application/services/bookmark_service_impl.rs
use std::path::Path;
use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::{BookmarkService, ImportSummary};
use crate::domain::bookmark::Bookmark;
use crate::domain::draft::BookmarkDraft;
use crate::domain::error::DomainError;
use crate::domain::repositories::import_repository::ImportRepository;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::tag::AUTHOR_MARKER;
use tracing::{debug, error, info, instrument};
use url::Url;

#[derive(Debug)]
pub struct BookmarkServiceImpl<R: BookmarkRepository> {
    repository: Arc<R>,
    import_repository: Arc<dyn ImportRepository>,
}

impl<R: BookmarkRepository> BookmarkServiceImpl<R> {
    pub fn new(repository: Arc<R>, import_repository: Arc<dyn ImportRepository>) -> Self {
        Self {
            repository,
            import_repository,
        }
    }

    #[instrument(skip(self), level = "trace")]
    fn validate_bookmark_id(&self, id: i32) -> ApplicationResult<()> {
        if id <= 0 {
            return Err(ApplicationError::Validation(format!(
                "Invalid bookmark ID: {}",
                id
            )));
        }
        Ok(())
    }

    /// Rejects drafts before any transaction is opened.
    #[instrument(skip_all, level = "trace")]
    fn validate_draft(&self, draft: &BookmarkDraft) -> ApplicationResult<()> {
        Url::parse(&draft.url).map_err(|e| {
            ApplicationError::Validation(format!("Invalid URL '{}': {}", draft.url, e))
        })?;
        if draft.shortcut.contains(char::is_whitespace) {
            return Err(ApplicationError::Validation(format!(
                "Shortcut must be a single word: '{}'",
                draft.shortcut
            )));
        }
        Ok(())
    }

    fn load_existing(&self, id: i32) -> ApplicationResult<Bookmark> {
        self.repository
            .get_by_id(id)?
            .ok_or(ApplicationError::BookmarkNotFound(id))
    }
}

impl<R: BookmarkRepository> BookmarkService for BookmarkServiceImpl<R> {
    #[instrument(skip(self, draft), level = "debug", fields(url = %draft.url))]
    fn add_bookmark(&self, draft: &BookmarkDraft) -> ApplicationResult<Bookmark> {
        self.validate_draft(draft)?;

        let id = self.repository.create(draft)?;
        debug!("Added bookmark {}", id);
        self.load_existing(id)
    }

    #[instrument(skip(self, draft), level = "debug", fields(url = %draft.url))]
    fn edit_bookmark(&self, id: i32, draft: &BookmarkDraft) -> ApplicationResult<Bookmark> {
        self.validate_bookmark_id(id)?;
        self.validate_draft(draft)?;

        match self.repository.update(id, draft) {
            Ok(()) => self.load_existing(id),
            Err(DomainError::BookmarkNotFound(_)) => Err(ApplicationError::BookmarkNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), level = "debug")]
    fn mark_read(&self, id: i32) -> ApplicationResult<()> {
        self.validate_bookmark_id(id)?;

        if !self.repository.mark_read(id)? {
            return Err(ApplicationError::BookmarkNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_bookmark(&self, id: i32) -> ApplicationResult<()> {
        self.validate_bookmark_id(id)?;

        if !self.repository.soft_delete(id)? {
            return Err(ApplicationError::BookmarkNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn get_bookmark(&self, id: i32) -> ApplicationResult<Option<Bookmark>> {
        self.validate_bookmark_id(id)?;

        Ok(self.repository.get_by_id(id)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_all_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>> {
        Ok(self.repository.get_all()?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_unread_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>> {
        Ok(self.repository.get_unread()?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_shortcut_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>> {
        Ok(self.repository.get_shortcuts()?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_bookmarks_by_tag(&self, tag: &str) -> ApplicationResult<Vec<Bookmark>> {
        Ok(self.repository.get_by_tag(tag)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_bookmarks_by_author(&self, author: &str) -> ApplicationResult<Vec<Bookmark>> {
        let tag = format!("{}{}", AUTHOR_MARKER, author);
        Ok(self.repository.get_by_tag(&tag)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn resolve_shortcut(&self, shortcut: &str) -> ApplicationResult<Option<String>> {
        Ok(self.repository.shortcut_url(shortcut.trim())?)
    }

    #[instrument(skip(self), level = "info")]
    fn import_bookmarks(&self, path: &Path) -> ApplicationResult<ImportSummary> {
        let records = self
            .import_repository
            .read_records(path)
            .map_err(|e| ApplicationError::Domain(e.context("reading import file")))?;

        let mut summary = ImportSummary::default();
        for record in &records {
            match self.repository.import(record) {
                Ok(id) => {
                    debug!("Imported {} as {}", record.url, id);
                    summary.imported += 1;
                }
                Err(e) => {
                    error!("Import of {} rolled back: {}", record.url, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Imported {} bookmarks, {} failed",
            summary.imported, summary.failed
        );
        Ok(summary)
    }
}
