// src/application/services/tag_service_impl.rs
use std::sync::Arc;

use crate::application::error::ApplicationResult;
use crate::application::services::tag_service::TagService;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::tag::Tag;
use tracing::{debug, instrument};

pub struct TagServiceImpl<R: BookmarkRepository> {
    repository: Arc<R>,
}

impl<R: BookmarkRepository> TagServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        debug!("Creating new TagServiceImpl");
        Self { repository }
    }
}

impl<R: BookmarkRepository> TagService for TagServiceImpl<R> {
    #[instrument(skip(self), level = "debug", fields(repo_type = std::any::type_name::<R>()))]
    fn get_all_tags(&self) -> ApplicationResult<Vec<Tag>> {
        Ok(self.repository.all_tags()?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_all_authors(&self) -> ApplicationResult<Vec<Tag>> {
        Ok(self.repository.all_authors()?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_bookmark_tags(&self, bookmark_id: i32) -> ApplicationResult<Vec<Tag>> {
        Ok(self.repository.tags_of(bookmark_id)?)
    }
}
