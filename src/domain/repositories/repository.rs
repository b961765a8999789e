// src/domain/repositories/repository.rs

use crate::domain::bookmark::Bookmark;
use crate::domain::draft::{BookmarkDraft, ImportRecord};
use crate::domain::error::DomainResult;
use crate::domain::tag::Tag;

/// Persistence operations for bookmarks and their tags.
///
/// Every write method runs as exactly one atomic transaction: it either
/// commits completely or leaves the store untouched. Read methods never open
/// a transaction and never return soft-deleted bookmarks. Lists are ordered by
/// creation time, newest first.
pub trait BookmarkRepository: std::fmt::Debug + Send + Sync {
    /// Insert a bookmark and its tag associations, returning the new id
    fn create(&self, draft: &BookmarkDraft) -> DomainResult<i32>;

    /// Insert a bookmark with externally supplied creation and read times
    fn import(&self, record: &ImportRecord) -> DomainResult<i32>;

    /// Rewrite a live bookmark's fields; tag associations are replaced only
    /// when the tag string changed
    fn update(&self, id: i32, draft: &BookmarkDraft) -> DomainResult<()>;

    /// Stamp `read_at` with the current time; false if no live bookmark matched
    fn mark_read(&self, id: i32) -> DomainResult<bool>;

    /// Stamp `deleted_at` with the current time; false if no live bookmark matched
    fn soft_delete(&self, id: i32) -> DomainResult<bool>;

    fn get_all(&self) -> DomainResult<Vec<Bookmark>>;

    fn get_unread(&self) -> DomainResult<Vec<Bookmark>>;

    fn get_shortcuts(&self) -> DomainResult<Vec<Bookmark>>;

    fn get_by_id(&self, id: i32) -> DomainResult<Option<Bookmark>>;

    /// Bookmarks associated with the tag of exactly this name
    fn get_by_tag(&self, name: &str) -> DomainResult<Vec<Bookmark>>;

    /// Target URL of the most recently created bookmark using `shortcut`
    fn shortcut_url(&self, shortcut: &str) -> DomainResult<Option<String>>;

    /// Plain tags in use by live bookmarks, with usage counts
    fn all_tags(&self) -> DomainResult<Vec<Tag>>;

    /// Author tags in use by live bookmarks, with usage counts
    fn all_authors(&self) -> DomainResult<Vec<Tag>>;

    /// Tags reachable through the association rows of one bookmark
    fn tags_of(&self, bookmark_id: i32) -> DomainResult<Vec<Tag>>;
}
