// src/domain/tag.rs
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Prefix that turns a tag into an author facet.
pub const AUTHOR_MARKER: &str = "by:";

/// Selects which tokens of a tag string are of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFilter {
    All,
    Plain,
    Authors,
}

impl TagFilter {
    pub fn accepts(&self, token: &str) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Plain => !is_author_name(token),
            TagFilter::Authors => is_author_name(token),
        }
    }
}

pub fn is_author_name(name: &str) -> bool {
    name.starts_with(AUTHOR_MARKER)
}

/// Split a space-delimited tag string into tokens matching `filter`.
///
/// Empty or whitespace-only input yields an empty list.
pub fn parse_tag_tokens(tag_str: &str, filter: TagFilter) -> Vec<String> {
    tag_str
        .split_whitespace()
        .map(str::trim)
        .filter(|t| !t.is_empty() && filter.accepts(t))
        .map(str::to_string)
        .collect()
}

/// Canonical form of a raw tag input: single-space separated, duplicates dropped
/// (first occurrence wins).
pub fn normalize_tag_string(raw: &str) -> String {
    raw.split_whitespace().unique().join(" ")
}

/// A persisted tag together with its usage count among non-deleted bookmarks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub is_author: bool,
    pub num_entries: i64,
}

impl Tag {
    pub fn new(id: i32, name: impl Into<String>, is_author: bool, num_entries: i64) -> Self {
        Self {
            id,
            name: name.into(),
            is_author,
            num_entries,
        }
    }

    /// Name as shown to users: author tags lose their marker.
    pub fn display_name(&self) -> &str {
        if self.is_author {
            self.name.strip_prefix(AUTHOR_MARKER).unwrap_or(&self.name)
        } else {
            &self.name
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.num_entries)
    }
}
