//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "flashcards", version, about = "Practice flashcard collections with a weighted shuffle")]
pub struct Cli {
    /// SQLite database file (overrides FLASHCARDS_DB).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Pause after each answer in milliseconds (overrides FLASHCARDS_ADVANCE_DELAY_MS).
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List collections.
    Collections,
    /// Create a collection.
    Create {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Hex color; defaults to the first palette entry.
        #[arg(long)]
        color: Option<String>,
    },
    /// Change a collection's title, description or color.
    Edit {
        collection: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a collection and its cards.
    Delete { collection: String },
    /// List a collection's cards with their stats.
    Cards { collection: String },
    /// Add a card.
    Add {
        collection: String,
        question: String,
        answer: String,
    },
    /// Change a card's question or answer.
    EditCard {
        collection: String,
        card: String,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
    },
    /// Remove a card.
    Remove { collection: String, card: String },
    /// Print the prompts to send to a question generator.
    Prompt {
        collection: String,
        topic: String,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Add generated question/answer pairs from a JSON file.
    Import {
        collection: String,
        file: PathBuf,
        /// Maximum number of cards to add.
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Write all collections as JSON (stdout when no file is given).
    Export { file: Option<PathBuf> },
    /// Replace all collections with a JSON export.
    Load { file: PathBuf },
    /// Practice a collection.
    Practice { collection: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_practice_with_global_flags() {
        let cli = Cli::try_parse_from(["flashcards", "--delay-ms", "0", "practice", "Capitals"]).unwrap();
        assert_eq!(cli.delay_ms, Some(0));
        assert!(matches!(cli.command, Command::Practice { ref collection } if collection == "Capitals"));
    }

    #[test]
    fn import_count_default() {
        let cli = Cli::try_parse_from(["flashcards", "import", "Bio", "cards.json"]).unwrap();
        assert!(matches!(cli.command, Command::Import { count: 10, .. }));
    }

    #[test]
    fn edit_card_subcommand_name() {
        let cli = Cli::try_parse_from([
            "flashcards",
            "edit-card",
            "Bio",
            "1a2b",
            "--answer",
            "Mitochondria",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::EditCard { answer: Some(_), question: None, .. }));
    }
}
