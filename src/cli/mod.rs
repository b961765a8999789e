// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::bookmark_commands::ListScope;
use crate::cli::display::Palette;
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use std::io::{self, IsTerminal};

pub mod args;
pub mod bookmark_commands;
pub mod display;
pub mod error;
pub mod tag_commands;

pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    let palette = Palette::new(!cli.no_color && io::stdout().is_terminal());

    let command = match cli.command {
        Some(command) => command,
        None => return Ok(()),
    };

    // Commands that work without an existing database
    match &command {
        Commands::CreateDb { path } => return bookmark_commands::create_db(path),
        Commands::Config => {
            println!("{}", crate::config::generate_default_config());
            return Ok(());
        }
        _ => {}
    }

    let services = ServiceContainer::new(settings)?;

    match command {
        Commands::Add { url, fields } => bookmark_commands::add(&services, &url, &fields),
        Commands::Edit {
            id,
            url,
            fields,
            read,
        } => bookmark_commands::edit(&services, id, url.as_deref(), &fields, read),
        Commands::Read { id } => bookmark_commands::mark_read(&services, id),
        Commands::Delete { id } => bookmark_commands::delete(&services, id),
        Commands::Show { id } => bookmark_commands::show(&services, id, palette),
        Commands::List {
            unread,
            shortcuts,
            tag,
            author,
            json,
        } => {
            let scope = match (unread, shortcuts, tag, author) {
                (true, _, _, _) => ListScope::Unread,
                (_, true, _, _) => ListScope::Shortcuts,
                (_, _, Some(tag), _) => ListScope::Tag(tag),
                (_, _, _, Some(author)) => ListScope::Author(author),
                _ => ListScope::All,
            };
            bookmark_commands::list(&services, &scope, json, palette)
        }
        Commands::Tags => tag_commands::show_tags(&services, palette),
        Commands::Authors => tag_commands::show_authors(&services, palette),
        Commands::Go { shortcut, print } => bookmark_commands::go(&services, &shortcut, print),
        Commands::ImportPinboard { path } => bookmark_commands::import_pinboard(&services, &path),
        Commands::CreateDb { .. } | Commands::Config => Ok(()),
    }
}
