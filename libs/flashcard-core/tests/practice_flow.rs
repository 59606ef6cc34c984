//! End-to-end practice passes against the in-memory store.

mod common;

use std::collections::HashSet;

use flashcard_core::{AnswerOutcome, CardSide, PracticeSession, SessionPhase};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use common::{seeded, service_with_cards};

/// Three new cards answered correct, incorrect, correct.
#[test]
fn test_three_card_session() {
    let (mut service, collection_id) = service_with_cards(3);
    let collection = service.get(collection_id).unwrap();
    assert!(collection.cards.iter().all(|c| c.weight == 1.0));

    let mut session = PracticeSession::start(&collection, &mut seeded(1)).unwrap();
    let queued: HashSet<Uuid> = session.queue().iter().map(|c| c.id).collect();
    let stored: HashSet<Uuid> = collection.cards.iter().map(|c| c.id).collect();
    assert_eq!(queued, stored);

    let mut last = AnswerOutcome::Ignored;
    for correct in [true, false, true] {
        session.flip();
        assert_eq!(session.side(), CardSide::Answer);
        last = session.answer(correct, &mut service).unwrap();
        session.finish_advance();
    }

    let AnswerOutcome::Completed { summary, .. } = last else {
        panic!("session did not complete: {last:?}");
    };
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.incorrect, 1);
    assert_eq!(summary.percentage, 67);
    assert_eq!(session.phase(), SessionPhase::Complete);

    // Counts were written back as each card was answered.
    let stored = service.get(collection_id).unwrap();
    let correct: u32 = stored.cards.iter().map(|c| c.correct_count).sum();
    let incorrect: u32 = stored.cards.iter().map(|c| c.incorrect_count).sum();
    assert_eq!((correct, incorrect), (2, 1));
    for card in &stored.cards {
        assert_eq!(card.weight, card.current_weight());
    }
}

/// Restart draws from the reloaded collection, with the counts from the
/// previous pass.
#[test]
fn test_restart_uses_persisted_counts() {
    let (mut service, collection_id) = service_with_cards(4);
    let collection = service.get(collection_id).unwrap();
    let mut session = PracticeSession::start(&collection, &mut seeded(2)).unwrap();

    while !session.is_complete() {
        session.flip();
        session.answer(false, &mut service).unwrap();
        session.finish_advance();
    }

    let reloaded = service.get(collection_id).unwrap();
    assert!(reloaded.cards.iter().all(|c| c.weight == 3.0));

    session.restart(&reloaded.cards, &mut seeded(3)).unwrap();
    assert_eq!(session.phase(), SessionPhase::Active);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.correct_count(), 0);
    assert_eq!(session.incorrect_count(), 0);
    assert!(session.queue().iter().all(|c| c.incorrect_count == 1));
}

/// A double click during the advance delay is counted once, also in storage.
#[test]
fn test_double_answer_persists_once() {
    let (mut service, collection_id) = service_with_cards(2);
    let collection = service.get(collection_id).unwrap();
    let mut session = PracticeSession::start(&collection, &mut seeded(4)).unwrap();
    let first = session.current_card().unwrap().id;

    session.flip();
    session.answer(true, &mut service).unwrap();
    assert_eq!(session.answer(true, &mut service).unwrap(), AnswerOutcome::Ignored);

    let stored = service.get(collection_id).unwrap();
    assert_eq!(stored.card(first).unwrap().correct_count, 1);
    assert_eq!(session.correct_count(), 1);
}

/// A card deleted mid-session surfaces as an error and leaves the tally alone.
#[test]
fn test_answer_for_deleted_card() {
    let (mut service, collection_id) = service_with_cards(2);
    let collection = service.get(collection_id).unwrap();
    let mut session = PracticeSession::start(&collection, &mut seeded(5)).unwrap();
    let current = session.current_card().unwrap().id;
    service.delete_card(collection_id, current).unwrap();

    session.flip();
    assert!(session.answer(true, &mut service).is_err());
    assert_eq!(session.correct_count(), 0);
    assert_eq!(session.current_index(), 0);
}
