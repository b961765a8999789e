// src/util/testing.rs

use std::env;
use std::sync::{Arc, OnceLock};
use tempfile::TempDir;
use tracing::{debug, instrument};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::clock::ManualClock;
use crate::infrastructure::repositories::sqlite::connection::init_pool;
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;

/// Start of the manual clock used by [`setup_test_db_with_clock`].
pub const TEST_EPOCH: i64 = 1_700_000_000;

static TEST_LOGGING: OnceLock<()> = OnceLock::new();

/// Sets up logging exactly once per test binary.
pub fn init_test_env() {
    TEST_LOGGING.get_or_init(setup_test_logging);
}

fn setup_test_logging() {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

#[derive(Debug, Clone)]
pub struct EnvGuard {
    db_url: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            db_url: env::var("BLAND_DB_URL").ok(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        env::remove_var("BLAND_DB_URL");
        if let Some(val) = &self.db_url {
            env::set_var("BLAND_DB_URL", val);
        }
    }
}

/// Fresh, migrated database in its own temp dir. Keep the `TempDir` alive for
/// as long as the repository is used.
pub fn setup_test_db() -> (TempDir, SqliteBookmarkRepository) {
    let (dir, repo, _clock) = setup_test_db_with_clock();
    (dir, repo)
}

/// Like [`setup_test_db`], but writes take their time from a [`ManualClock`]
/// starting at [`TEST_EPOCH`].
pub fn setup_test_db_with_clock() -> (TempDir, SqliteBookmarkRepository, Arc<ManualClock>) {
    init_test_env();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("bland.db");
    debug!("Test database at {}", db_path.display());

    let pool = init_pool(db_path.to_string_lossy().as_ref()).expect("Failed to init pool");
    let clock = Arc::new(ManualClock::new(TEST_EPOCH));
    let repo = SqliteBookmarkRepository::with_clock(pool, clock.clone());
    (dir, repo, clock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_fresh_db_when_setup_then_connection_available() {
        let (_dir, repo) = setup_test_db();
        assert!(repo.get_connection().is_ok());
    }
}
