//! Collection and card mutations over a whole-array store.
//!
//! Every mutation loads the full collections array, changes it, bumps the
//! relevant `updated_at` stamps and writes the full array back.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{CoreError, Result, StoreError};
use crate::session::AnswerRecorder;
use crate::types::{Card, CardPatch, Collection, CollectionPatch, GeneratedQuestion};

/// Persistence collaborator holding every collection as one array.
pub trait CollectionStore {
    fn get_collections(&self) -> std::result::Result<Vec<Collection>, StoreError>;
    fn save_collections(&mut self, collections: &[Collection]) -> std::result::Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Vec<Collection>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save_collections` calls so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl CollectionStore for MemoryStore {
    fn get_collections(&self) -> std::result::Result<Vec<Collection>, StoreError> {
        Ok(self.collections.clone())
    }

    fn save_collections(&mut self, collections: &[Collection]) -> std::result::Result<(), StoreError> {
        self.collections = collections.to_vec();
        self.saves += 1;
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Collection operations on top of a [`CollectionStore`].
pub struct CollectionService<S> {
    store: S,
}

impl<S: CollectionStore> CollectionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn list(&self) -> Result<Vec<Collection>> {
        Ok(self.store.get_collections()?)
    }

    pub fn get(&self, collection_id: Uuid) -> Result<Collection> {
        self.list()?
            .into_iter()
            .find(|c| c.id == collection_id)
            .ok_or(CoreError::CollectionNotFound(collection_id))
    }

    pub fn create_collection(
        &mut self,
        title: &str,
        description: Option<String>,
        color: &str,
    ) -> Result<Collection> {
        require_text("title", title)?;
        let mut collections = self.list()?;
        let collection = Collection::new(title.trim(), description, color);
        collections.push(collection.clone());
        self.store.save_collections(&collections)?;
        tracing::info!(collection_id = %collection.id, title = %collection.title, "collection created");
        Ok(collection)
    }

    pub fn update_collection(&mut self, collection_id: Uuid, patch: &CollectionPatch) -> Result<Collection> {
        if let Some(title) = &patch.title {
            require_text("title", title)?;
        }
        self.modify(collection_id, |collection| {
            collection.apply(patch, Utc::now());
            Ok(collection.clone())
        })
    }

    /// Remove a collection. Returns false if it did not exist.
    pub fn delete_collection(&mut self, collection_id: Uuid) -> Result<bool> {
        let mut collections = self.list()?;
        let before = collections.len();
        collections.retain(|c| c.id != collection_id);
        if collections.len() == before {
            return Ok(false);
        }
        self.store.save_collections(&collections)?;
        tracing::info!(%collection_id, "collection deleted");
        Ok(true)
    }

    pub fn add_card(&mut self, collection_id: Uuid, question: &str, answer: &str) -> Result<Card> {
        require_text("question", question)?;
        require_text("answer", answer)?;
        let card = Card::new(question.trim(), answer.trim());
        self.modify(collection_id, |collection| {
            collection.cards.push(card.clone());
            collection.touch(card.created_at);
            Ok(())
        })?;
        tracing::info!(%collection_id, card_id = %card.id, "card added");
        Ok(card)
    }

    /// Append generated question/answer pairs as fresh cards.
    pub fn add_generated_cards(
        &mut self,
        collection_id: Uuid,
        questions: &[GeneratedQuestion],
    ) -> Result<Vec<Card>> {
        let cards: Vec<Card> = questions
            .iter()
            .map(|q| Card {
                is_generated: true,
                ..Card::new(q.question.trim(), q.answer.trim())
            })
            .collect();
        self.modify(collection_id, |collection| {
            collection.cards.extend(cards.iter().cloned());
            collection.touch(Utc::now());
            Ok(())
        })?;
        tracing::info!(%collection_id, count = cards.len(), "generated cards added");
        Ok(cards)
    }

    /// Merge a partial update into a card, re-deriving its weight.
    pub fn update_card(&mut self, collection_id: Uuid, card_id: Uuid, patch: &CardPatch) -> Result<Card> {
        if let Some(question) = &patch.question {
            require_text("question", question)?;
        }
        if let Some(answer) = &patch.answer {
            require_text("answer", answer)?;
        }
        let updated = self.modify(collection_id, |collection| {
            let now = Utc::now();
            let card = collection
                .card_mut(card_id)
                .ok_or(CoreError::CardNotFound {
                    collection_id,
                    card_id,
                })?;
            card.apply(patch, now);
            let card = card.clone();
            collection.touch(now);
            Ok(card)
        })?;
        tracing::debug!(
            %collection_id,
            %card_id,
            correct = updated.correct_count,
            incorrect = updated.incorrect_count,
            weight = updated.weight,
            "card updated"
        );
        Ok(updated)
    }

    /// Remove a card. Returns false if the card did not exist.
    pub fn delete_card(&mut self, collection_id: Uuid, card_id: Uuid) -> Result<bool> {
        self.modify(collection_id, |collection| {
            let before = collection.cards.len();
            collection.cards.retain(|c| c.id != card_id);
            let removed = collection.cards.len() != before;
            if removed {
                collection.touch(Utc::now());
            }
            Ok(removed)
        })
    }

    fn modify<T, F>(&mut self, collection_id: Uuid, f: F) -> Result<T>
    where
        F: FnOnce(&mut Collection) -> Result<T>,
    {
        let mut collections = self.list()?;
        let collection = collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .ok_or(CoreError::CollectionNotFound(collection_id))?;
        let value = f(collection)?;
        self.store.save_collections(&collections)?;
        Ok(value)
    }
}

impl<S: CollectionStore> AnswerRecorder for CollectionService<S> {
    fn record_answer(&mut self, collection_id: Uuid, card_id: Uuid, correct: bool) -> Result<Card> {
        let collection = self.get(collection_id)?;
        let card = collection.card(card_id).ok_or(CoreError::CardNotFound {
            collection_id,
            card_id,
        })?;
        let patch = CardPatch::answered(card, correct);
        self.update_card(collection_id, card_id, &patch)
    }
}
