pub mod import_repository;
pub mod repository;
