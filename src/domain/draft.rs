// src/domain/draft.rs
use crate::domain::tag::{normalize_tag_string, parse_tag_tokens, TagFilter};
use derive_builder::Builder;

/// Field values for creating or editing a bookmark, as supplied by a caller.
///
/// `tags` is always held in normalized form (see [`normalize_tag_string`]).
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(
    setter(into),
    build_fn(private, name = "build_raw", validate = "Self::validate")
)]
pub struct BookmarkDraft {
    pub url: String,
    #[builder(default)]
    pub title: String,
    #[builder(default)]
    pub description: String,
    #[builder(default)]
    pub shortcut: String,
    #[builder(default)]
    pub tags: String,
    #[builder(default = "false")]
    pub to_read: bool,
}

impl BookmarkDraftBuilder {
    pub fn build(&self) -> Result<BookmarkDraft, BookmarkDraftBuilderError> {
        let mut draft = self.build_raw()?;
        draft.url = draft.url.trim().to_string();
        draft.shortcut = draft.shortcut.trim().to_string();
        draft.tags = normalize_tag_string(&draft.tags);
        Ok(draft)
    }

    fn validate(&self) -> Result<(), String> {
        match &self.url {
            Some(url) if url.trim().is_empty() => Err("url must not be empty".to_string()),
            _ => Ok(()),
        }
    }
}

impl BookmarkDraft {
    pub fn builder() -> BookmarkDraftBuilder {
        BookmarkDraftBuilder::default()
    }

    /// Read time this draft asks for: `0` keeps it on the to-read list.
    pub fn incoming_read_at(&self, now: i64) -> i64 {
        if self.to_read {
            0
        } else {
            now
        }
    }

    pub fn tag_tokens(&self) -> Vec<String> {
        parse_tag_tokens(&self.tags, TagFilter::All)
    }
}

/// A bookmark loaded from an external export, carrying its own history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    pub shortcut: String,
    pub tags: String,
    pub created_at: i64,
    pub read_at: i64,
}

impl ImportRecord {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        tags: &str,
        created_at: i64,
        read_at: i64,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            shortcut: String::new(),
            tags: normalize_tag_string(tags),
            created_at,
            read_at,
        }
    }

    pub fn tag_tokens(&self) -> Vec<String> {
        parse_tag_tokens(&self.tags, TagFilter::All)
    }
}
