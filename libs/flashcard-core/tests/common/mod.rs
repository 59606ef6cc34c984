//! Shared fixtures for practice flow tests.

use flashcard_core::{CollectionService, MemoryStore, COLLECTION_COLORS};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Service over an in-memory store holding one collection of `num_cards`
/// unattempted cards.
pub fn service_with_cards(num_cards: usize) -> (CollectionService<MemoryStore>, Uuid) {
    let mut service = CollectionService::new(MemoryStore::new());
    let collection = service
        .create_collection("Fixture", Some("Generated for tests".into()), COLLECTION_COLORS[0])
        .expect("create collection");
    for i in 0..num_cards {
        service
            .add_card(collection.id, &format!("Question {}?", i + 1), &format!("Answer {}.", i + 1))
            .expect("add card");
    }
    (service, collection.id)
}

pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
