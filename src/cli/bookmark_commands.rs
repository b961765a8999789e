// src/cli/bookmark_commands.rs
use crate::application::services::bookmark_service::BookmarkService;
use crate::cli::args::DraftArgs;
use crate::cli::display::{write_bookmark_detail, write_bookmarks, Palette};
use crate::cli::error::{CliError, CliResult};
use crate::domain::bookmark::Bookmark;
use crate::domain::draft::BookmarkDraft;
use crate::domain::error::DomainError;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::repositories::sqlite::connection::init_pool;
use crossterm::style::Stylize;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, instrument};

/// Which slice of the store `list` shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    All,
    Unread,
    Shortcuts,
    Tag(String),
    Author(String),
}

fn draft_from_args(url: &str, fields: &DraftArgs) -> CliResult<BookmarkDraft> {
    BookmarkDraft::builder()
        .url(url)
        .title(fields.title.clone().unwrap_or_default())
        .description(fields.description.clone().unwrap_or_default())
        .shortcut(fields.shortcut.clone().unwrap_or_default())
        .tags(fields.tags.clone().unwrap_or_default())
        .to_read(fields.to_read)
        .build()
        .map_err(|e| CliError::from(DomainError::from(e)))
}

/// Draft for `edit`: starts from the stored bookmark and applies given fields.
fn merge_edit(
    current: &Bookmark,
    url: Option<&str>,
    fields: &DraftArgs,
    read: bool,
) -> CliResult<BookmarkDraft> {
    let to_read = if fields.to_read {
        true
    } else if read {
        false
    } else {
        current.is_unread()
    };
    let tags = fields
        .tags
        .clone()
        .unwrap_or_else(|| current.tag_string_for_edit());

    BookmarkDraft::builder()
        .url(url.unwrap_or(&current.url))
        .title(fields.title.clone().unwrap_or_else(|| current.title.clone()))
        .description(
            fields
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
        )
        .shortcut(
            fields
                .shortcut
                .clone()
                .unwrap_or_else(|| current.shortcut.clone()),
        )
        .tags(tags)
        .to_read(to_read)
        .build()
        .map_err(|e| CliError::from(DomainError::from(e)))
}

#[instrument(level = "debug")]
pub fn create_db(path: &str) -> CliResult<()> {
    if Path::new(path).exists() {
        return Err(CliError::InvalidInput(format!(
            "Database already exists at: {}. Please choose a different path or delete the existing file.",
            path
        )));
    }

    eprintln!("Creating new database at: {}", path);
    init_pool(path)?;
    eprintln!("Database created successfully at: {}", path.green());
    Ok(())
}

#[instrument(skip(services, fields), level = "debug")]
pub fn add(services: &ServiceContainer, url: &str, fields: &DraftArgs) -> CliResult<()> {
    let draft = draft_from_args(url, fields)?;
    let bookmark = services.bookmark_service.add_bookmark(&draft)?;
    eprintln!("Added bookmark: {} (ID: {})", bookmark.title.as_str().green(), bookmark.id);
    println!("{}", bookmark.id);
    Ok(())
}

#[instrument(skip(services, fields), level = "debug")]
pub fn edit(
    services: &ServiceContainer,
    id: i32,
    url: Option<&str>,
    fields: &DraftArgs,
    read: bool,
) -> CliResult<()> {
    let current = services
        .bookmark_service
        .get_bookmark(id)?
        .ok_or_else(|| CliError::InvalidInput(format!("No bookmark with ID {}", id)))?;

    let draft = merge_edit(&current, url, fields, read)?;
    debug!("Edit draft: {:?}", draft);
    let updated = services.bookmark_service.edit_bookmark(id, &draft)?;
    eprintln!("Updated bookmark: {} (ID: {})", updated.title.as_str().green(), updated.id);
    Ok(())
}

pub fn mark_read(services: &ServiceContainer, id: i32) -> CliResult<()> {
    services.bookmark_service.mark_read(id)?;
    eprintln!("Marked bookmark {} as read", id);
    Ok(())
}

pub fn delete(services: &ServiceContainer, id: i32) -> CliResult<()> {
    services.bookmark_service.delete_bookmark(id)?;
    eprintln!("Deleted bookmark {}", id);
    Ok(())
}

pub fn show(services: &ServiceContainer, id: i32, palette: Palette) -> CliResult<()> {
    let bookmark = services
        .bookmark_service
        .get_bookmark(id)?
        .ok_or_else(|| CliError::InvalidInput(format!("No bookmark with ID {}", id)))?;
    let tags = services.tag_service.get_bookmark_tags(id)?;

    let mut out = io::stdout().lock();
    write_bookmark_detail(&mut out, &bookmark, &tags, palette)?;
    Ok(())
}

fn load_scope(service: &dyn BookmarkService, scope: &ListScope) -> CliResult<Vec<Bookmark>> {
    let bookmarks = match scope {
        ListScope::All => service.get_all_bookmarks()?,
        ListScope::Unread => service.get_unread_bookmarks()?,
        ListScope::Shortcuts => service.get_shortcut_bookmarks()?,
        ListScope::Tag(tag) => service.get_bookmarks_by_tag(tag)?,
        ListScope::Author(author) => service.get_bookmarks_by_author(author)?,
    };
    Ok(bookmarks)
}

#[instrument(skip(services), level = "debug")]
pub fn list(
    services: &ServiceContainer,
    scope: &ListScope,
    json: bool,
    palette: Palette,
) -> CliResult<()> {
    let bookmarks = load_scope(services.bookmark_service.as_ref(), scope)?;

    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&bookmarks)?)?;
        return Ok(());
    }
    if bookmarks.is_empty() {
        eprintln!("No bookmarks to display");
        return Ok(());
    }
    write_bookmarks(&mut out, &bookmarks, palette)?;
    Ok(())
}

#[instrument(skip(services), level = "debug")]
pub fn go(services: &ServiceContainer, shortcut: &str, print: bool) -> CliResult<()> {
    let url = services
        .bookmark_service
        .resolve_shortcut(shortcut)?
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown shortcut: {}", shortcut)))?;

    if print {
        println!("{}", url);
        return Ok(());
    }
    debug!("Opening {}", url);
    open::that(&url).map_err(|e| CliError::CommandFailed(format!("Failed to open {}: {}", url, e)))
}

#[instrument(skip(services), level = "info")]
pub fn import_pinboard(services: &ServiceContainer, path: &Path) -> CliResult<()> {
    let summary = services
        .bookmark_service
        .import_bookmarks(path)
        .map_err(|e| CliError::from(e).context(format!("import {}", path.display())))?;
    eprintln!(
        "{}",
        format!(
            "Imported {} bookmarks ({} failed)",
            summary.imported, summary.failed
        )
        .green()
    );
    Ok(())
}
