//! Local SQLite persistence for flashcard collections.

pub mod error;
pub mod schema;
pub mod sqlite;

pub use error::DbError;
pub use sqlite::{SqliteStore, COLLECTIONS_KEY};
