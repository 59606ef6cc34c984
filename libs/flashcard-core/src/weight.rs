//! Weight model: maps a card's answer history to a sampling weight.
//!
//! Poorly known cards get a higher weight and are expanded into more copies
//! by the [shuffler](crate::shuffle), which biases them toward the front of a
//! practice queue without ever excluding well known cards.

/// Weight of a card that has never been answered.
pub const NEW_CARD_WEIGHT: f64 = 1.0;

/// Weight of a card whose success rate is below every band.
pub const MAX_WEIGHT: f64 = 3.0;

/// `(minimum success rate, weight)` bands, highest threshold first.
const WEIGHT_BANDS: [(f64, f64); 8] = [
    (0.9, 0.1),
    (0.8, 0.3),
    (0.7, 0.5),
    (0.6, 0.8),
    (0.5, 1.0),
    (0.4, 1.5),
    (0.3, 2.0),
    (0.2, 2.5),
];

/// Fraction of answers that were correct, or `None` for an unattempted card.
pub fn success_rate(correct: u32, incorrect: u32) -> Option<f64> {
    let total = u64::from(correct) + u64::from(incorrect);
    if total == 0 {
        return None;
    }
    Some(correct as f64 / total as f64)
}

/// Sampling weight for a card with the given counts.
///
/// Ranges from 0.1 (at least 90% correct) to 3.0 (under 20% correct);
/// unattempted cards get exactly [`NEW_CARD_WEIGHT`].
pub fn calculate_weight(correct: u32, incorrect: u32) -> f64 {
    let Some(rate) = success_rate(correct, incorrect) else {
        return NEW_CARD_WEIGHT;
    };

    WEIGHT_BANDS
        .iter()
        .find(|(threshold, _)| rate >= *threshold)
        .map(|(_, weight)| *weight)
        .unwrap_or(MAX_WEIGHT)
}

/// Number of copies a card contributes to the weighted pool.
pub fn pool_copies(weight: f64) -> usize {
    (weight.ceil() as usize).max(1)
}
