//! Terminal front end for practicing flashcard collections.

pub mod cli;
pub mod commands;
pub mod config;

use anyhow::Context;
use clap::Parser;
use flashcard_core::CollectionService;
use flashcard_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.db.clone(), cli.delay_ms);

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    tracing::debug!(db = %config.db_path.display(), "opening database");
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("opening {}", config.db_path.display()))?;
    let mut service = CollectionService::new(store);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    commands::dispatch(
        cli.command,
        &mut service,
        &config,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
    .await
}
