// src/cli/display.rs
use crate::domain::bookmark::Bookmark;
use crate::domain::tag::Tag;
use crossterm::style::Stylize;
use itertools::Itertools;
use std::io::{self, Write};

/// Colors are applied only when enabled, so output stays plain in pipes.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn title(&self, s: &str) -> String {
        if self.color {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    fn url(&self, s: &str) -> String {
        if self.color {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    }

    fn tags(&self, s: &str) -> String {
        if self.color {
            s.blue().to_string()
        } else {
            s.to_string()
        }
    }

    fn dim(&self, s: &str) -> String {
        if self.color {
            s.dark_grey().to_string()
        } else {
            s.to_string()
        }
    }
}

fn tag_line(bookmark: &Bookmark) -> String {
    let plain = bookmark.plain_tags().join(" ");
    let authors = bookmark.authors().join(", ");
    match (plain.is_empty(), authors.is_empty()) {
        (true, true) => String::new(),
        (false, true) => plain,
        (true, false) => format!("by {}", authors),
        (false, false) => format!("{} | by {}", plain, authors),
    }
}

/// One entry per bookmark: title line, url, tags.
pub fn write_bookmarks<W: Write>(
    out: &mut W,
    bookmarks: &[Bookmark],
    palette: Palette,
) -> io::Result<()> {
    let first_col_width = bookmarks.len().to_string().len();

    for (i, bm) in bookmarks.iter().enumerate() {
        let mut flags = Vec::new();
        if bm.is_unread() {
            flags.push("unread".to_string());
        }
        if bm.has_shortcut() {
            flags.push(format!("@{}", bm.shortcut));
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };

        writeln!(
            out,
            "{:first_col_width$}. {} [{}]{}",
            i + 1,
            palette.title(&bm.title),
            bm.id,
            palette.dim(&flags)
        )?;
        writeln!(out, "{:first_col_width$}  {}", "", palette.url(&bm.url))?;
        let tags = tag_line(bm);
        if !tags.is_empty() {
            writeln!(out, "{:first_col_width$}  {}", "", palette.tags(&tags))?;
        }
    }
    Ok(())
}

/// Full detail of a single bookmark.
pub fn write_bookmark_detail<W: Write>(
    out: &mut W,
    bookmark: &Bookmark,
    tags: &[Tag],
    palette: Palette,
) -> io::Result<()> {
    writeln!(out, "{} [{}]", palette.title(&bookmark.title), bookmark.id)?;
    writeln!(out, "  url:         {}", palette.url(&bookmark.url))?;
    if !bookmark.description.is_empty() {
        writeln!(out, "  description: {}", bookmark.description)?;
    }
    if bookmark.has_shortcut() {
        writeln!(out, "  shortcut:    {}", bookmark.shortcut)?;
    }
    let tag_list = tags.iter().map(|t| t.display_name()).join(" ");
    writeln!(out, "  tags:        {}", palette.tags(&tag_list))?;
    writeln!(out, "  edit tags:   {}", bookmark.tag_string_for_edit())?;
    writeln!(
        out,
        "  created:     {}",
        bookmark.time_created().format("%Y-%m-%d %H:%M")
    )?;
    writeln!(
        out,
        "  updated:     {}",
        bookmark.time_updated().format("%Y-%m-%d %H:%M")
    )?;
    let read = if bookmark.is_unread() {
        "unread".to_string()
    } else {
        bookmark.time_read().format("%Y-%m-%d %H:%M").to_string()
    };
    writeln!(out, "  read:        {}", read)?;
    Ok(())
}

/// `name (count)` per line, author markers stripped.
pub fn write_tags<W: Write>(out: &mut W, tags: &[Tag], palette: Palette) -> io::Result<()> {
    for tag in tags {
        writeln!(
            out,
            "  {} ({})",
            palette.tags(tag.display_name()),
            tag.num_entries
        )?;
    }
    Ok(())
}
