//! Core types for the flashcard application.
//!
//! Field names serialize in camelCase so a collections array exported from
//! the browser application loads unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::weight::{calculate_weight, success_rate, NEW_CARD_WEIGHT};

/// Default palette offered when creating a collection.
pub const COLLECTION_COLORS: [&str; 8] = [
    "#3B82F6", // Blue
    "#8B5CF6", // Purple
    "#EF4444", // Red
    "#10B981", // Emerald
    "#F59E0B", // Amber
    "#EC4899", // Pink
    "#6366F1", // Indigo
    "#84CC16", // Lime
];

fn default_weight() -> f64 {
    NEW_CARD_WEIGHT
}

/// A question/answer card and its answer history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub incorrect_count: u32,
    /// Cached for display. Always re-derived from the counts.
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub is_generated: bool,
}

impl Card {
    /// Create an unattempted card.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            answer: answer.into(),
            created_at: now,
            updated_at: now,
            correct_count: 0,
            incorrect_count: 0,
            weight: NEW_CARD_WEIGHT,
            is_generated: false,
        }
    }

    /// Weight computed from the counts, ignoring the cached field.
    pub fn current_weight(&self) -> f64 {
        calculate_weight(self.correct_count, self.incorrect_count)
    }

    pub fn success_rate(&self) -> Option<f64> {
        success_rate(self.correct_count, self.incorrect_count)
    }

    pub fn attempts(&self) -> u32 {
        self.correct_count.saturating_add(self.incorrect_count)
    }

    /// Refresh the cached weight from the counts.
    pub fn rederive_weight(&mut self) {
        self.weight = self.current_weight();
    }

    /// Count one answer and re-derive the weight in the same step.
    pub fn record(&mut self, correct: bool, now: DateTime<Utc>) {
        if correct {
            self.correct_count = self.correct_count.saturating_add(1);
        } else {
            self.incorrect_count = self.incorrect_count.saturating_add(1);
        }
        self.updated_at = now;
        self.rederive_weight();
    }

    /// Merge a partial update, then re-derive the weight.
    pub fn apply(&mut self, patch: &CardPatch, now: DateTime<Utc>) {
        if let Some(question) = &patch.question {
            self.question = question.clone();
        }
        if let Some(answer) = &patch.answer {
            self.answer = answer.clone();
        }
        if let Some(correct) = patch.correct_count {
            self.correct_count = correct;
        }
        if let Some(incorrect) = patch.incorrect_count {
            self.incorrect_count = incorrect;
        }
        self.updated_at = now;
        self.rederive_weight();
    }
}

/// Partial update of a card. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incorrect_count: Option<u32>,
}

impl CardPatch {
    /// Patch that counts one more answer on top of `card`'s current counts.
    pub fn answered(card: &Card, correct: bool) -> Self {
        if correct {
            Self {
                correct_count: Some(card.correct_count.saturating_add(1)),
                ..Default::default()
            }
        } else {
            Self {
                incorrect_count: Some(card.incorrect_count.saturating_add(1)),
                ..Default::default()
            }
        }
    }
}

/// A named set of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub cards: Vec<Card>,
    /// Fields this crate does not model (such as `folderIds`), kept so a
    /// save writes them back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection {
    pub fn new(title: impl Into<String>, description: Option<String>, color: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            color: color.into(),
            created_at: now,
            updated_at: now,
            cards: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn card(&self, card_id: Uuid) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: Uuid) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    /// Re-derive every cached card weight.
    pub fn rederive_weights(&mut self) {
        for card in &mut self.cards {
            card.rederive_weight();
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Merge a metadata update and bump `updated_at`.
    pub fn apply(&mut self, patch: &CollectionPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        self.touch(now);
    }
}

/// Partial update of a collection's metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `Some(None)` (JSON `null`) clears the description.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A question/answer pair produced by a question generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub answer: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Outcome of one answered card in a practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResult {
    pub card_id: Uuid,
    pub correct: bool,
}
