//! Whole-database JSON export and load.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use flashcard_core::CollectionService;
use flashcard_store::SqliteStore;

/// Write the collections array to `file`, or to `out` when no file is given.
pub fn export<W: Write>(
    service: &CollectionService<SqliteStore>,
    file: Option<&Path>,
    out: &mut W,
) -> anyhow::Result<()> {
    let json = service.store().export_json()?;
    match file {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
            writeln!(out, "Exported to {}", path.display())?;
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

/// Replace every stored collection with the contents of an export file.
pub fn load<W: Write>(
    service: &mut CollectionService<SqliteStore>,
    file: &Path,
    out: &mut W,
) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let count = service
        .store_mut()
        .import_json(&json)
        .with_context(|| format!("{} is not a collections export", file.display()))?;
    writeln!(out, "Loaded {count} collections")?;
    Ok(())
}
