// src/application/services/bookmark_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::Bookmark;
use crate::domain::draft::BookmarkDraft;
use std::path::Path;

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

/// Service interface for bookmark-related operations
pub trait BookmarkService: Send + Sync {
    /// Store a new bookmark and return it as persisted
    fn add_bookmark(&self, draft: &BookmarkDraft) -> ApplicationResult<Bookmark>;

    /// Overwrite a bookmark with the draft's values
    fn edit_bookmark(&self, id: i32, draft: &BookmarkDraft) -> ApplicationResult<Bookmark>;

    fn mark_read(&self, id: i32) -> ApplicationResult<()>;

    /// Soft delete: the bookmark disappears from every listing
    fn delete_bookmark(&self, id: i32) -> ApplicationResult<()>;

    fn get_bookmark(&self, id: i32) -> ApplicationResult<Option<Bookmark>>;

    fn get_all_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>>;

    fn get_unread_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>>;

    fn get_shortcut_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>>;

    fn get_bookmarks_by_tag(&self, tag: &str) -> ApplicationResult<Vec<Bookmark>>;

    /// Bookmarks carrying `by:<author>`
    fn get_bookmarks_by_author(&self, author: &str) -> ApplicationResult<Vec<Bookmark>>;

    /// Target of the most recent live bookmark using `shortcut`
    fn resolve_shortcut(&self, shortcut: &str) -> ApplicationResult<Option<String>>;

    /// Load an export file, one write transaction per record
    fn import_bookmarks(&self, path: &Path) -> ApplicationResult<ImportSummary>;
}
