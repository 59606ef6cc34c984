//! SQLite-backed key/value store holding the collections array.

use std::collections::HashSet;
use std::path::Path;

use chrono::Utc;
use flashcard_core::{Collection, CollectionStore, StoreError};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::DbError;
use crate::schema::{SCHEMA, SCHEMA_VERSION};

type Result<T> = std::result::Result<T, DbError>;

/// Key under which the collections array is stored.
pub const COLLECTIONS_KEY: &str = "flashstudy_collections";

const UPSERT_ITEM: &str = "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

/// SQLite implementation of [`CollectionStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    pub fn schema_version(&self) -> Result<i32> {
        let version = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
        Ok(version)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(UPSERT_ITEM, params![key, value, now])?;
        Ok(())
    }

    /// Remove a key. Returns false if it was absent.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM storage WHERE key = ?1", params![key])?;
        Ok(count > 0)
    }

    /// Load the collections array, re-deriving every cached card weight.
    pub fn load_collections(&self) -> Result<Vec<Collection>> {
        let Some(json) = self.get_item(COLLECTIONS_KEY)? else {
            return Ok(Vec::new());
        };
        let mut collections: Vec<Collection> = serde_json::from_str(&json)?;
        for collection in &mut collections {
            collection.rederive_weights();
        }
        Ok(collections)
    }

    /// Overwrite the collections array in one transaction.
    pub fn store_collections(&mut self, collections: &[Collection]) -> Result<()> {
        let json = serde_json::to_string(collections)?;
        let tx = self.conn.transaction()?;
        tx.execute(
            UPSERT_ITEM,
            params![COLLECTIONS_KEY, json, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
        tracing::debug!(collections = collections.len(), bytes = json.len(), "collections saved");
        Ok(())
    }

    /// Collections array as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        let collections = self.load_collections()?;
        Ok(serde_json::to_string_pretty(&collections)?)
    }

    /// Replace the collections array with a JSON document.
    ///
    /// The document must parse as a collections array with unique ids;
    /// nothing is written otherwise. Returns the number of collections imported.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let mut collections: Vec<Collection> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        if let Some(dup) = collections.iter().find(|c| !seen.insert(c.id)) {
            return Err(DbError::InvalidData(format!("duplicate collection id {}", dup.id)));
        }
        for collection in &mut collections {
            collection.rederive_weights();
        }
        self.store_collections(&collections)?;
        tracing::info!(collections = collections.len(), "collections imported");
        Ok(collections.len())
    }
}

impl CollectionStore for SqliteStore {
    fn get_collections(&self) -> std::result::Result<Vec<Collection>, StoreError> {
        self.load_collections().map_err(|err| {
            tracing::warn!(error = %err, "failed to load collections");
            StoreError::from(err)
        })
    }

    fn save_collections(&mut self, collections: &[Collection]) -> std::result::Result<(), StoreError> {
        self.store_collections(collections).map_err(|err| {
            tracing::warn!(error = %err, "failed to save collections");
            StoreError::from(err)
        })
    }
}
