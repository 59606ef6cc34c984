//! Weighted shuffle that orders one practice pass.
//!
//! Each card is inserted into a pool `ceil(weight)` times, the pool is
//! permuted with Fisher–Yates, and the first occurrence of every card is
//! kept. Every card appears exactly once in the result; cards with more
//! copies are more likely to land near the front.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::Card;
use crate::weight::pool_copies;

/// Build the queue for one practice pass using `rng` as randomness source.
pub fn build_practice_queue<R>(cards: &[Card], rng: &mut R) -> Vec<Card>
where
    R: Rng + ?Sized,
{
    let mut pool: Vec<&Card> = Vec::with_capacity(cards.len() * 3);
    for card in cards {
        let copies = pool_copies(card.current_weight());
        pool.extend(std::iter::repeat(card).take(copies));
    }

    pool.shuffle(rng);

    let mut seen = HashSet::with_capacity(cards.len());
    pool.into_iter()
        .filter(|card| seen.insert(card.id))
        .cloned()
        .collect()
}

/// Build a queue with fresh, unseeded randomness.
pub fn build_practice_queue_with_thread_rng(cards: &[Card]) -> Vec<Card> {
    build_practice_queue(cards, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn card_with_counts(correct: u32, incorrect: u32) -> Card {
        let mut card = Card::new(format!("Q {correct}/{incorrect}"), "A");
        card.correct_count = correct;
        card.incorrect_count = incorrect;
        card.rederive_weight();
        card
    }

    fn ids(cards: &[Card]) -> HashSet<Uuid> {
        cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn empty_input_gives_empty_queue() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(build_practice_queue(&[], &mut rng).is_empty());
        assert!(build_practice_queue_with_thread_rng(&[]).is_empty());
    }

    #[test]
    fn every_card_exactly_once() {
        let cards = vec![
            card_with_counts(0, 0),
            card_with_counts(9, 1),
            card_with_counts(1, 9),
            card_with_counts(3, 7),
            card_with_counts(5, 5),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let queue = build_practice_queue(&cards, &mut rng);
            assert_eq!(queue.len(), cards.len());
            assert_eq!(ids(&queue), ids(&cards));
        }
    }

    #[test]
    fn repeated_calls_keep_the_same_set() {
        let cards: Vec<Card> = (0..12).map(|_| card_with_counts(0, 0)).collect();
        let first = build_practice_queue_with_thread_rng(&cards);
        let second = build_practice_queue_with_thread_rng(&cards);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn stale_cached_weight_is_ignored() {
        let mut card = card_with_counts(9, 1);
        card.weight = 3.0;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let queue = build_practice_queue(std::slice::from_ref(&card), &mut rng);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, card.id);
    }

    #[test]
    fn same_seed_same_order() {
        let cards: Vec<Card> = (0..10).map(|i| card_with_counts(i, 10 - i)).collect();
        let a = build_practice_queue(&cards, &mut ChaCha8Rng::seed_from_u64(99));
        let b = build_practice_queue(&cards, &mut ChaCha8Rng::seed_from_u64(99));
        let a: Vec<Uuid> = a.iter().map(|c| c.id).collect();
        let b: Vec<Uuid> = b.iter().map(|c| c.id).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn weak_cards_front_load_more_often() {
        let weak = card_with_counts(1, 9);
        let strong = card_with_counts(9, 1);
        let mut cards = vec![weak.clone(), strong.clone()];
        cards.extend((0..6).map(|_| card_with_counts(0, 0)));
        let half = cards.len() / 2;

        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut weak_front = 0;
        let mut strong_front = 0;
        for _ in 0..5_000 {
            let queue = build_practice_queue(&cards, &mut rng);
            let position = |id: Uuid| queue.iter().position(|c| c.id == id).unwrap();
            if position(weak.id) < half {
                weak_front += 1;
            }
            if position(strong.id) < half {
                strong_front += 1;
            }
        }
        assert!(
            weak_front > strong_front,
            "weak card in front half {weak_front} times, strong {strong_front}"
        );
    }
}
