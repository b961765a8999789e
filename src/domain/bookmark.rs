// src/domain/bookmark.rs
use crate::domain::tag::{parse_tag_tokens, TagFilter, AUTHOR_MARKER};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A stored bookmark.
///
/// Timestamps are Unix seconds. `deleted_at` and `read_at` use `0` as "unset":
/// a nonzero `deleted_at` excludes the row from every read, a zero `read_at`
/// marks the bookmark as still to be read.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub shortcut: String,
    pub description: String,
    /// Space-delimited tag tokens, authors included with their `by:` marker.
    pub tags: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: i64,
    pub read_at: i64,
}

impl Bookmark {
    pub fn is_unread(&self) -> bool {
        self.read_at == 0
    }

    pub fn has_shortcut(&self) -> bool {
        !self.shortcut.is_empty()
    }

    pub fn parse_tags_by(&self, filter: TagFilter) -> Vec<String> {
        parse_tag_tokens(&self.tags, filter)
    }

    /// Every token of the tag string, authors included.
    pub fn all_tags(&self) -> Vec<String> {
        self.parse_tags_by(TagFilter::All)
    }

    /// Plain tags only.
    pub fn plain_tags(&self) -> Vec<String> {
        self.parse_tags_by(TagFilter::Plain)
    }

    /// Author names with the marker stripped.
    pub fn authors(&self) -> Vec<String> {
        self.parse_tags_by(TagFilter::Authors)
            .into_iter()
            .map(|t| t.strip_prefix(AUTHOR_MARKER).unwrap_or(&t).to_string())
            .collect()
    }

    /// Tag input as the edit form shows it: plain tags first, then authors.
    pub fn tag_string_for_edit(&self) -> String {
        self.plain_tags()
            .into_iter()
            .chain(self.authors().into_iter().map(|a| format!("{}{}", AUTHOR_MARKER, a)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    // A zero timestamp converts to the epoch; check the raw field before display.
    pub fn time_created(&self) -> DateTime<Utc> {
        unix_to_datetime(self.created_at)
    }

    pub fn time_updated(&self) -> DateTime<Utc> {
        unix_to_datetime(self.updated_at)
    }

    pub fn time_read(&self) -> DateTime<Utc> {
        unix_to_datetime(self.read_at)
    }
}

pub(crate) fn unix_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {} ({})", self.id, self.title, self.url, self.tags)
    }
}

impl fmt::Debug for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bookmark")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("title", &self.title)
            .field("shortcut", &self.shortcut)
            .field("tags", &self.tags)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("deleted_at", &self.deleted_at)
            .field("read_at", &self.read_at)
            .finish()
    }
}
