// src/infrastructure/repositories/sqlite/migration.rs
use diesel_migrations::{embed_migrations, EmbeddedMigrations};

/// Schema for `bookmarks`, `tags` and `tags_bookmarks`, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
