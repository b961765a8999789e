// src/application/services/tag_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::tag::Tag;

/// Service interface for tag-related operations
pub trait TagService: Send + Sync {
    /// Plain tags on live bookmarks, with usage counts, ordered by name
    fn get_all_tags(&self) -> ApplicationResult<Vec<Tag>>;

    /// `by:` author tags on live bookmarks, with usage counts, ordered by name
    fn get_all_authors(&self) -> ApplicationResult<Vec<Tag>>;

    /// Tags attached to one bookmark
    fn get_bookmark_tags(&self, bookmark_id: i32) -> ApplicationResult<Vec<Tag>>;
}
