//! Collection listing and metadata commands.

use std::io::Write;

use anyhow::bail;
use flashcard_core::{CollectionPatch, CollectionService, CollectionStore, COLLECTION_COLORS};

use super::find_collection;

pub fn list<S, W>(service: &CollectionService<S>, out: &mut W) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    let collections = service.list()?;
    if collections.is_empty() {
        writeln!(out, "No collections yet. Create one with `flashcards create <title>`.")?;
        return Ok(());
    }
    for collection in &collections {
        writeln!(
            out,
            "{}  {} ({} cards)",
            collection.id,
            collection.title,
            collection.cards.len()
        )?;
        if let Some(description) = &collection.description {
            writeln!(out, "    {description}")?;
        }
    }
    Ok(())
}

fn check_color(color: &str) -> anyhow::Result<()> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("color must look like #RRGGBB, got {color:?}");
    }
    Ok(())
}

pub fn create<S, W>(
    service: &mut CollectionService<S>,
    title: &str,
    description: Option<String>,
    color: Option<&str>,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    let color = color.unwrap_or(COLLECTION_COLORS[0]);
    check_color(color)?;
    let description = description.filter(|d| !d.trim().is_empty());
    let collection = service.create_collection(title, description, color)?;
    writeln!(out, "Created {} ({})", collection.title, collection.id)?;
    Ok(())
}

/// An empty `description` clears it.
pub fn edit<S, W>(
    service: &mut CollectionService<S>,
    query: &str,
    title: Option<String>,
    description: Option<String>,
    color: Option<String>,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    if title.is_none() && description.is_none() && color.is_none() {
        bail!("nothing to change; pass --title, --description or --color");
    }
    if let Some(color) = &color {
        check_color(color)?;
    }
    let collection = find_collection(service, query)?;
    let patch = CollectionPatch {
        title: title.map(|t| t.trim().to_string()),
        description: description.map(|d| Some(d).filter(|d| !d.trim().is_empty())),
        color,
    };
    let updated = service.update_collection(collection.id, &patch)?;
    writeln!(out, "Updated {}", updated.title)?;
    Ok(())
}

pub fn delete<S, W>(service: &mut CollectionService<S>, query: &str, out: &mut W) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    let collection = find_collection(service, query)?;
    service.delete_collection(collection.id)?;
    writeln!(
        out,
        "Deleted {} and its {} cards",
        collection.title,
        collection.cards.len()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashcard_core::MemoryStore;
    use pretty_assertions::assert_eq;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn create_then_list() {
        let mut service = CollectionService::new(MemoryStore::new());
        let mut out = Vec::new();
        create(&mut service, "Capitals", Some("Europe".into()), None, &mut out).unwrap();

        let mut listing = Vec::new();
        list(&service, &mut listing).unwrap();
        let listing = output(listing);
        assert!(listing.contains("Capitals (0 cards)"));
        assert!(listing.contains("    Europe"));
        assert_eq!(service.list().unwrap()[0].color, COLLECTION_COLORS[0]);
    }

    #[test]
    fn rejects_bad_color() {
        let mut service = CollectionService::new(MemoryStore::new());
        let result = create(&mut service, "Capitals", None, Some("blue"), &mut Vec::new());
        assert!(result.is_err());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn edit_clears_description() {
        let mut service = CollectionService::new(MemoryStore::new());
        create(&mut service, "Capitals", Some("Europe".into()), None, &mut Vec::new()).unwrap();
        edit(
            &mut service,
            "capitals",
            Some("World capitals".into()),
            Some(String::new()),
            Some("#10B981".into()),
            &mut Vec::new(),
        )
        .unwrap();
        let collection = &service.list().unwrap()[0];
        assert_eq!(collection.title, "World capitals");
        assert_eq!(collection.description, None);
        assert_eq!(collection.color, "#10B981");
    }

    #[test]
    fn edit_without_changes_is_rejected() {
        let mut service = CollectionService::new(MemoryStore::new());
        create(&mut service, "Capitals", None, None, &mut Vec::new()).unwrap();
        let before = service.list().unwrap()[0].clone();

        let err = edit(&mut service, "Capitals", None, None, None, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("nothing to change"));
        assert_eq!(service.store().saves(), 1);
        assert_eq!(service.list().unwrap()[0], before);
    }

    #[test]
    fn delete_by_title() {
        let mut service = CollectionService::new(MemoryStore::new());
        create(&mut service, "Capitals", None, None, &mut Vec::new()).unwrap();
        let mut out = Vec::new();
        delete(&mut service, "Capitals", &mut out).unwrap();
        assert!(output(out).starts_with("Deleted Capitals"));
        assert!(service.list().unwrap().is_empty());
    }
}
