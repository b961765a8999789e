// src/cli/tag_commands.rs
use crate::cli::display::{write_tags, Palette};
use crate::cli::error::CliResult;
use crate::infrastructure::di::ServiceContainer;
use std::io;

pub fn show_tags(services: &ServiceContainer, palette: Palette) -> CliResult<()> {
    let tags = services.tag_service.get_all_tags()?;
    if tags.is_empty() {
        eprintln!("No tags found");
        return Ok(());
    }
    write_tags(&mut io::stdout().lock(), &tags, palette)?;
    Ok(())
}

pub fn show_authors(services: &ServiceContainer, palette: Palette) -> CliResult<()> {
    let authors = services.tag_service.get_all_authors()?;
    if authors.is_empty() {
        eprintln!("No authors found");
        return Ok(());
    }
    write_tags(&mut io::stdout().lock(), &authors, palette)?;
    Ok(())
}
