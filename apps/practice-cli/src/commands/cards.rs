//! Card listing, editing and generated-card import.

use std::io::Write;

use flashcard_core::generation::{system_prompt, user_prompt};
use flashcard_core::{
    parse_generated_questions, CardPatch, CollectionService, CollectionStore, GenerationRequest,
};

use super::{find_card, find_collection, short_id};

pub fn list<S, W>(service: &CollectionService<S>, query: &str, out: &mut W) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    let collection = find_collection(service, query)?;
    if collection.cards.is_empty() {
        writeln!(out, "{} has no cards.", collection.title)?;
        return Ok(());
    }
    for card in &collection.cards {
        let rate = card
            .success_rate()
            .map(|r| format!("{:.0}%", r * 100.0))
            .unwrap_or_else(|| "new".into());
        writeln!(
            out,
            "{}  {}  [{} right / {} wrong, {rate}, weight {}]",
            short_id(card.id),
            card.question,
            card.correct_count,
            card.incorrect_count,
            card.current_weight()
        )?;
    }
    Ok(())
}

pub fn add<S, W>(
    service: &mut CollectionService<S>,
    query: &str,
    question: &str,
    answer: &str,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    let collection = find_collection(service, query)?;
    let card = service.add_card(collection.id, question, answer)?;
    writeln!(out, "Added card {} to {}", short_id(card.id), collection.title)?;
    Ok(())
}

pub fn edit<S, W>(
    service: &mut CollectionService<S>,
    query: &str,
    card_query: &str,
    question: Option<String>,
    answer: Option<String>,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    let collection = find_collection(service, query)?;
    let card_id = find_card(&collection, card_query)?.id;
    let patch = CardPatch {
        question: question.map(|q| q.trim().to_string()),
        answer: answer.map(|a| a.trim().to_string()),
        ..Default::default()
    };
    let card = service.update_card(collection.id, card_id, &patch)?;
    writeln!(out, "Updated card {}", short_id(card.id))?;
    Ok(())
}

pub fn remove<S, W>(
    service: &mut CollectionService<S>,
    query: &str,
    card_query: &str,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    let collection = find_collection(service, query)?;
    let card_id = find_card(&collection, card_query)?.id;
    service.delete_card(collection.id, card_id)?;
    writeln!(out, "Removed card {}", short_id(card_id))?;
    Ok(())
}

pub fn prompt<S, W>(
    service: &CollectionService<S>,
    query: &str,
    topic: &str,
    count: usize,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    let collection = find_collection(service, query)?;
    let request = GenerationRequest {
        prompt: topic.trim().to_string(),
        count,
        collection_title: Some(collection.title),
    };
    writeln!(out, "{}\n", system_prompt(request.count))?;
    writeln!(out, "{}", user_prompt(&request))?;
    Ok(())
}

/// Add cards from a question generator's JSON response.
pub fn import<S, W>(
    service: &mut CollectionService<S>,
    query: &str,
    content: &str,
    count: usize,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: CollectionStore,
    W: Write,
{
    let collection = find_collection(service, query)?;
    let questions = parse_generated_questions(content, count)?;
    let cards = service.add_generated_cards(collection.id, &questions)?;
    writeln!(out, "Added {} generated cards to {}", cards.len(), collection.title)?;
    Ok(())
}
