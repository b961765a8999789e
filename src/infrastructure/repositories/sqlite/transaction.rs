// src/infrastructure/repositories/sqlite/transaction.rs
//! The bookmark write path.
//!
//! A [`BookmarkTransaction`] only exists inside
//! [`SqliteBookmarkRepository::write`](super::repository::SqliteBookmarkRepository::write):
//! the closure receives it, and the surrounding `BEGIN IMMEDIATE` commits when the
//! closure returns `Ok` and rolls back on `Err` or panic. There is no way to hold
//! one past the end of the closure, so a write can not be left unfinalized.

use super::error::{SqliteRepositoryError, SqliteResult};
use super::model::{DbBookmark, DbBookmarkChanges, DbTagBookmark, NewBookmark};
use super::schema::{bookmarks, tags_bookmarks};
use super::tag_repository;
use crate::domain::draft::{BookmarkDraft, ImportRecord};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

pub struct BookmarkTransaction<'c> {
    conn: &'c mut SqliteConnection,
    now: i64,
}

impl<'c> BookmarkTransaction<'c> {
    pub(super) fn new(conn: &'c mut SqliteConnection, now: i64) -> Self {
        Self { conn, now }
    }

    /// Timestamp shared by every write in this transaction.
    #[cfg(test)]
    pub(crate) fn now(&self) -> i64 {
        self.now
    }

    /// Resolve-or-create a single tag inside this transaction.
    #[cfg(test)]
    pub(crate) fn resolve_tag(&mut self, name: &str) -> SqliteResult<i32> {
        tag_repository::resolve_or_create(self.conn, name)
    }

    /// Insert a new bookmark and one association row per distinct tag.
    #[instrument(skip_all, level = "debug", fields(url = %draft.url))]
    pub fn create(&mut self, draft: &BookmarkDraft) -> SqliteResult<i32> {
        let tag_ids = tag_repository::resolve_all(self.conn, &draft.tag_tokens())?;

        let new = NewBookmark {
            url: &draft.url,
            title: &draft.title,
            shortcut: &draft.shortcut,
            description: &draft.description,
            tags: &draft.tags,
            created_at: self.now,
            updated_at: self.now,
            deleted_at: 0,
            read_at: draft.incoming_read_at(self.now),
        };
        let id = self.insert_bookmark(&new)?;
        self.insert_links(id, &tag_ids)?;

        debug!("Created bookmark {} with {} tags", id, tag_ids.len());
        Ok(id)
    }

    /// Insert a historical bookmark, keeping its own creation and read times.
    #[instrument(skip_all, level = "debug", fields(url = %record.url))]
    pub fn import(&mut self, record: &ImportRecord) -> SqliteResult<i32> {
        let tag_ids = tag_repository::resolve_all(self.conn, &record.tag_tokens())?;

        let new = NewBookmark {
            url: &record.url,
            title: &record.title,
            shortcut: &record.shortcut,
            description: &record.description,
            tags: &record.tags,
            created_at: record.created_at,
            updated_at: record.created_at,
            deleted_at: 0,
            read_at: record.read_at,
        };
        let id = self.insert_bookmark(&new)?;
        self.insert_links(id, &tag_ids)?;
        Ok(id)
    }

    /// Overwrite a live bookmark with the draft's values.
    ///
    /// The association rows are replaced wholesale when the tag string changed
    /// and left alone when it did not.
    #[instrument(skip_all, level = "debug", fields(id = id))]
    pub fn update(&mut self, id: i32, draft: &BookmarkDraft) -> SqliteResult<()> {
        let current = bookmarks::table
            .filter(bookmarks::id.eq(id))
            .filter(bookmarks::deleted_at.eq(0))
            .select(DbBookmark::as_select())
            .first(&mut *self.conn)
            .optional()?
            .ok_or(SqliteRepositoryError::BookmarkNotFound(id))?;

        let tags_changed = draft.tags != current.tags;
        let tag_ids = if tags_changed {
            Some(tag_repository::resolve_all(self.conn, &draft.tag_tokens())?)
        } else {
            debug!("Tag string unchanged, keeping association rows");
            None
        };

        let changes = DbBookmarkChanges {
            url: &draft.url,
            title: &draft.title,
            shortcut: &draft.shortcut,
            description: &draft.description,
            tags: &draft.tags,
            updated_at: self.now,
            read_at: transition_read_at(current.read_at, draft.incoming_read_at(self.now)),
        };
        diesel::update(bookmarks::table.filter(bookmarks::id.eq(id)))
            .set(&changes)
            .execute(&mut *self.conn)?;

        if let Some(tag_ids) = tag_ids {
            diesel::delete(tags_bookmarks::table.filter(tags_bookmarks::bookmark_id.eq(id)))
                .execute(&mut *self.conn)?;
            self.insert_links(id, &tag_ids)?;
        }

        Ok(())
    }

    /// Set `read_at` to now, whatever its previous value.
    #[instrument(skip(self), level = "debug")]
    pub fn mark_read(&mut self, id: i32) -> SqliteResult<bool> {
        let n = diesel::update(
            bookmarks::table
                .filter(bookmarks::id.eq(id))
                .filter(bookmarks::deleted_at.eq(0)),
        )
        .set(bookmarks::read_at.eq(self.now))
        .execute(&mut *self.conn)?;
        Ok(n > 0)
    }

    /// Set `deleted_at` to now. Association and tag rows stay in place.
    #[instrument(skip(self), level = "debug")]
    pub fn soft_delete(&mut self, id: i32) -> SqliteResult<bool> {
        let n = diesel::update(
            bookmarks::table
                .filter(bookmarks::id.eq(id))
                .filter(bookmarks::deleted_at.eq(0)),
        )
        .set(bookmarks::deleted_at.eq(self.now))
        .execute(&mut *self.conn)?;
        Ok(n > 0)
    }

    fn insert_bookmark(&mut self, new: &NewBookmark<'_>) -> SqliteResult<i32> {
        debug!("Inserting bookmark: {}", new);
        Ok(diesel::insert_into(bookmarks::table)
            .values(new)
            .returning(bookmarks::id)
            .get_result::<i32>(&mut *self.conn)?)
    }

    fn insert_links(
        &mut self,
        bookmark_id: i32,
        tag_ids: &BTreeMap<String, i32>,
    ) -> SqliteResult<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let rows: Vec<DbTagBookmark> = tag_ids
            .values()
            .map(|&tag_id| DbTagBookmark {
                bookmark_id,
                tag_id,
            })
            .collect();
        diesel::insert_into(tags_bookmarks::table)
            .values(&rows)
            .execute(&mut *self.conn)?;
        Ok(())
    }
}

/// Read state only changes on a transition between read and unread.
///
/// Within the same state the stored value wins, so an edit never refreshes
/// the time a bookmark was read.
pub fn transition_read_at(stored: i64, incoming: i64) -> i64 {
    match (stored == 0, incoming == 0) {
        (true, false) => incoming,
        (false, true) => 0,
        _ => stored,
    }
}
