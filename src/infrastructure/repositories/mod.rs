pub mod pinboard_import_repository;
pub mod sqlite;
