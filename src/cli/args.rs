// src/cli/args.rs
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// A bookmark store with tags and authors
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Bookmark fields shared by `add` and `edit`
#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(short = 's', long)]
    pub shortcut: Option<String>,

    /// Space separated, authors as by:<name>, e.g. "rust db by:jane"
    #[arg(short = 't', long)]
    pub tags: Option<String>,

    /// Keep the bookmark on the to-read list
    #[arg(long = "to-read")]
    pub to_read: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new, empty database
    CreateDb {
        /// Path of the database file to create
        path: String,
    },
    /// Add a bookmark
    Add {
        url: String,
        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Edit a bookmark; omitted fields keep their value
    Edit {
        id: i32,
        #[arg(long)]
        url: Option<String>,
        #[command(flatten)]
        fields: DraftArgs,
        /// Mark as read again (clears --to-read)
        #[arg(long = "read", conflicts_with = "to_read")]
        read: bool,
    },
    /// Mark a bookmark as read
    Read { id: i32 },
    /// Delete a bookmark
    Delete { id: i32 },
    /// Show one bookmark with its tags
    Show { id: i32 },
    /// List bookmarks, newest first
    List {
        #[arg(long, conflicts_with_all = ["shortcuts", "tag", "author"])]
        unread: bool,
        #[arg(long, conflicts_with_all = ["tag", "author"])]
        shortcuts: bool,
        #[arg(long, conflicts_with = "author")]
        tag: Option<String>,
        #[arg(long)]
        author: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List tags with usage counts
    Tags,
    /// List authors with usage counts
    Authors,
    /// Open the bookmark registered under a shortcut
    Go {
        shortcut: String,
        /// Print the URL instead of opening it
        #[arg(long)]
        print: bool,
    },
    /// Import a Pinboard JSON export
    ImportPinboard { path: PathBuf },
    /// Print the default configuration
    Config,
}
