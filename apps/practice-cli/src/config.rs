//! Runtime configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// Default visual pause between an answer and the next card.
pub const DEFAULT_ADVANCE_DELAY_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub advance_delay: Duration,
}

/// Default database location under the platform data directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashcards")
        .join("flashcards.db")
}

impl Config {
    /// Read `FLASHCARDS_DB` and `FLASHCARDS_ADVANCE_DELAY_MS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("FLASHCARDS_DB")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let delay_ms = match lookup("FLASHCARDS_ADVANCE_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("FLASHCARDS_ADVANCE_DELAY_MS must be milliseconds, got {raw:?}"))?,
            None => DEFAULT_ADVANCE_DELAY_MS,
        };

        Ok(Self {
            db_path,
            advance_delay: Duration::from_millis(delay_ms),
        })
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, db: Option<PathBuf>, delay_ms: Option<u64>) -> Self {
        if let Some(db) = db {
            self.db_path = db;
        }
        if let Some(ms) = delay_ms {
            self.advance_delay = Duration::from_millis(ms);
        }
        self
    }
}
