// src/infrastructure/repositories/sqlite/model.rs
use crate::domain::bookmark::Bookmark;
use crate::domain::tag::Tag;
use crate::infrastructure::repositories::sqlite::schema::{bookmarks, tags, tags_bookmarks};
use diesel::sql_types::{BigInt, Bool, Integer, Text};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, QueryableByName, Selectable};
use std::fmt;

#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbBookmark {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub shortcut: String,
    pub description: String,
    pub tags: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: i64,
    pub read_at: i64,
}

impl From<DbBookmark> for Bookmark {
    fn from(db: DbBookmark) -> Self {
        Bookmark {
            id: db.id,
            url: db.url,
            title: db.title,
            shortcut: db.shortcut,
            description: db.description,
            tags: db.tags,
            created_at: db.created_at,
            updated_at: db.updated_at,
            deleted_at: db.deleted_at,
            read_at: db.read_at,
        }
    }
}

/// New bookmark for insertion
#[derive(Insertable, Debug)]
#[diesel(table_name = bookmarks)]
pub struct NewBookmark<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub shortcut: &'a str,
    pub description: &'a str,
    pub tags: &'a str,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: i64,
    pub read_at: i64,
}

impl fmt::Display for NewBookmark<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "url: {}, title: {}, shortcut: {}, tags: {}, created_at: {}, read_at: {}",
            self.url, self.title, self.shortcut, self.tags, self.created_at, self.read_at
        )
    }
}

/// Changes written by an edit. `created_at` and `deleted_at` are never part of it.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = bookmarks)]
pub struct DbBookmarkChanges<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub shortcut: &'a str,
    pub description: &'a str,
    pub tags: &'a str,
    pub updated_at: i64,
    pub read_at: i64,
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbTag {
    pub id: i32,
    pub name: String,
    pub is_author: bool,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = tags)]
pub struct NewTag<'a> {
    pub name: &'a str,
    pub is_author: bool,
}

/// One edge of the bookmark/tag relation
#[derive(Insertable, Queryable, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[diesel(table_name = tags_bookmarks)]
pub struct DbTagBookmark {
    pub bookmark_id: i32,
    pub tag_id: i32,
}

/// Tag usage counts for aggregation queries
#[derive(QueryableByName, Debug)]
pub struct TagUsage {
    #[diesel(sql_type = Integer)]
    pub id: i32,

    #[diesel(sql_type = Text)]
    pub name: String,

    #[diesel(sql_type = Bool)]
    pub is_author: bool,

    #[diesel(sql_type = BigInt)]
    pub num_entries: i64,
}

impl From<TagUsage> for Tag {
    fn from(t: TagUsage) -> Self {
        Tag::new(t.id, t.name, t.is_author, t.num_entries)
    }
}
