// src/domain/repositories/import_repository.rs
use crate::domain::draft::ImportRecord;
use crate::domain::error::DomainResult;
use std::fmt::Debug;
use std::path::Path;

/// Source of historical bookmarks for the bulk-load path.
pub trait ImportRepository: Send + Sync + Debug {
    fn read_records(&self, path: &Path) -> DomainResult<Vec<ImportRecord>>;
}
