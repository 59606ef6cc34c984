//! Shared setup for command-level integration tests.
//!
//! Each [`TestContext`] owns a fresh SQLite file in a temporary directory, so
//! tests exercise the same storage path the binary uses.

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;

use flashcard_core::CollectionService;
use flashcard_store::SqliteStore;
use flashcards_practice_cli::cli::Command;
use flashcards_practice_cli::commands;
use flashcards_practice_cli::config::Config;
use tempfile::TempDir;

pub struct TestContext {
    dir: TempDir,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            db_path: dir.path().join("flashcards.db"),
            advance_delay: Duration::ZERO,
        };
        Self { dir, config }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Open a new service on the test database, as each binary invocation does.
    pub fn service(&self) -> CollectionService<SqliteStore> {
        CollectionService::new(SqliteStore::open(&self.config.db_path).unwrap())
    }

    /// Run one command with scripted input and return what it printed.
    pub async fn run(&self, command: Command, input: &str) -> anyhow::Result<String> {
        let mut service = self.service();
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        commands::dispatch(command, &mut service, &self.config, &mut input, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }
}
