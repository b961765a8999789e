// src/infrastructure/repositories/pinboard_import_repository.rs

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::draft::ImportRecord;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::import_repository::ImportRepository;
use chrono::DateTime;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// One entry of a Pinboard JSON export (`/v1/posts/all?format=json`).
#[derive(Deserialize, Debug)]
struct PinboardPost {
    href: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    extended: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    toread: String,
    #[serde(default)]
    tags: String,
}

#[derive(Debug)]
pub struct PinboardImportRepository {
    clock: Arc<dyn Clock>,
}

impl Default for PinboardImportRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PinboardImportRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn parse_time(&self, raw: &str, href: &str) -> i64 {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts.timestamp(),
            Err(e) => {
                warn!("Invalid time '{}' for {}: {}, using now", raw, href, e);
                self.clock.now()
            }
        }
    }

    fn to_record(&self, post: PinboardPost) -> ImportRecord {
        let created_at = self.parse_time(&post.time, &post.href);
        // Only an explicit "no" counts as read
        let read_at = if post.toread == "no" { created_at } else { 0 };
        ImportRecord::new(
            post.href,
            post.description,
            post.extended,
            &post.tags,
            created_at,
            read_at,
        )
    }
}

impl ImportRepository for PinboardImportRepository {
    #[instrument(skip(self), level = "debug")]
    fn read_records(&self, path: &Path) -> DomainResult<Vec<ImportRecord>> {
        let file = File::open(path).map_err(|e| {
            DomainError::ImportFailed(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let mut content = String::new();
        BufReader::new(file).read_to_string(&mut content)?;

        let posts: Vec<PinboardPost> = serde_json::from_str(&content).map_err(|e| {
            DomainError::ImportFailed(format!(
                "Failed to parse JSON: {}. Expected a Pinboard export array.",
                e
            ))
        })?;

        debug!("Read {} Pinboard posts", posts.len());
        Ok(posts.into_iter().map(|p| self.to_record(p)).collect())
    }
}
