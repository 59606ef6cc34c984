//! Subcommand handlers.

pub mod backup;
pub mod cards;
pub mod collections;
pub mod practice;

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context};
use flashcard_core::{Card, Collection, CollectionService, CollectionStore};
use flashcard_store::SqliteStore;
use uuid::Uuid;

use crate::cli::Command;
use crate::config::Config;

pub async fn dispatch<R, W>(
    command: Command,
    service: &mut CollectionService<SqliteStore>,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    match command {
        Command::Collections => collections::list(service, out),
        Command::Create {
            title,
            description,
            color,
        } => collections::create(service, &title, description, color.as_deref(), out),
        Command::Edit {
            collection,
            title,
            description,
            color,
        } => collections::edit(service, &collection, title, description, color, out),
        Command::Delete { collection } => collections::delete(service, &collection, out),
        Command::Cards { collection } => cards::list(service, &collection, out),
        Command::Add {
            collection,
            question,
            answer,
        } => cards::add(service, &collection, &question, &answer, out),
        Command::EditCard {
            collection,
            card,
            question,
            answer,
        } => cards::edit(service, &collection, &card, question, answer, out),
        Command::Remove { collection, card } => cards::remove(service, &collection, &card, out),
        Command::Prompt {
            collection,
            topic,
            count,
        } => cards::prompt(service, &collection, &topic, count, out),
        Command::Import {
            collection,
            file,
            count,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            cards::import(service, &collection, &content, count, out)
        }
        Command::Export { file } => backup::export(service, file.as_deref(), out),
        Command::Load { file } => backup::load(service, &file, out),
        Command::Practice { collection } => {
            let collection = find_collection(service, &collection)?;
            let mut rng = rand::thread_rng();
            practice::run_practice(
                service,
                collection.id,
                input,
                out,
                config.advance_delay,
                &mut rng,
            )
            .await?;
            Ok(())
        }
    }
}

/// Resolve a collection by id or case-insensitive title.
pub fn find_collection<S: CollectionStore>(
    service: &CollectionService<S>,
    query: &str,
) -> anyhow::Result<Collection> {
    let collections = service.list()?;
    if let Ok(id) = Uuid::parse_str(query) {
        if let Some(found) = collections.iter().find(|c| c.id == id) {
            return Ok(found.clone());
        }
    }
    let query = query.trim();
    let mut matches = collections
        .into_iter()
        .filter(|c| c.title.eq_ignore_ascii_case(query));
    match (matches.next(), matches.next()) {
        (Some(found), None) => Ok(found),
        (Some(_), Some(_)) => bail!("more than one collection is titled {query:?}; use its id"),
        (None, _) => Err(anyhow!("no collection matches {query:?}")),
    }
}

/// Resolve a card by full id or unique id prefix.
pub fn find_card<'a>(collection: &'a Collection, query: &str) -> anyhow::Result<&'a Card> {
    let query = query.trim().to_ascii_lowercase();
    if query.is_empty() {
        bail!("card id must not be empty");
    }
    let mut matches = collection
        .cards
        .iter()
        .filter(|c| c.id.to_string().starts_with(&query));
    match (matches.next(), matches.next()) {
        (Some(card), None) => Ok(card),
        (Some(_), Some(_)) => bail!("card id prefix {query:?} is ambiguous"),
        (None, _) => Err(anyhow!("no card in {:?} matches {query:?}", collection.title)),
    }
}

/// First eight characters of an id, enough to pass back to `find_card`.
pub(crate) fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}
