//! Practice session state machine.
//!
//! A session walks a weighted-shuffled snapshot of a collection's cards. Each
//! answer is written through an [`AnswerRecorder`] before the session's own
//! tally moves, so a failed write never leaves the two out of step.
//!
//! ```text
//! Active(Question) --flip--> Active(Answer) --answer--> Active(Question) ...
//!                                          \--answer (last card)--> Complete
//! Complete --restart--> Active(Question)
//! ```

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::shuffle::build_practice_queue;
use crate::types::{Card, CardResult, Collection};

/// Persists the effect of one answer on a stored card.
pub trait AnswerRecorder {
    /// Count one answer on the stored card and return its updated state.
    fn record_answer(&mut self, collection_id: Uuid, card_id: Uuid, correct: bool) -> Result<Card>;
}

/// Top-level session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Active,
    Complete,
}

/// Which side of the current card is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSide {
    Question,
    Answer,
}

impl CardSide {
    fn flipped(self) -> Self {
        match self {
            Self::Question => Self::Answer,
            Self::Answer => Self::Question,
        }
    }
}

/// Final tally of a completed pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub collection_id: Uuid,
    pub total: usize,
    pub correct: u32,
    pub incorrect: u32,
    pub percentage: u32,
    pub results: Vec<CardResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// What an `answer` call did.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// Out-of-turn call; nothing changed.
    Ignored,
    /// Answer recorded; the next card is queued behind the advance delay.
    Advanced { updated: Card },
    /// Answer recorded on the last card.
    Completed { updated: Card, summary: SessionSummary },
}

/// Rounded share of correct answers, 0 for an empty pass.
pub fn score_percentage(correct: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * f64::from(correct) / total as f64).round() as u32
}

/// One practice pass over a collection.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    collection_id: Uuid,
    queue: Vec<Card>,
    current_index: usize,
    side: CardSide,
    phase: SessionPhase,
    correct_count: u32,
    incorrect_count: u32,
    results: Vec<CardResult>,
    advancing: bool,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl PracticeSession {
    /// Start a pass over a snapshot of `collection`'s cards.
    pub fn start<R>(collection: &Collection, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let queue = build_practice_queue(&collection.cards, rng);
        Self::from_queue(collection.id, queue)
    }

    /// Start a pass over an already ordered queue.
    pub fn from_queue(collection_id: Uuid, queue: Vec<Card>) -> Result<Self> {
        if queue.is_empty() {
            return Err(CoreError::NoCards);
        }
        tracing::debug!(%collection_id, cards = queue.len(), "practice session started");
        Ok(Self {
            collection_id,
            queue,
            current_index: 0,
            side: CardSide::Question,
            phase: SessionPhase::Active,
            correct_count: 0,
            incorrect_count: 0,
            results: Vec::new(),
            advancing: false,
            started_at: Utc::now(),
            finished_at: None,
        })
    }

    pub fn collection_id(&self) -> Uuid {
        self.collection_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    pub fn side(&self) -> CardSide {
        self.side
    }

    /// True between an answer and the matching `finish_advance`.
    pub fn is_advancing(&self) -> bool {
        self.advancing
    }

    pub fn queue(&self) -> &[Card] {
        &self.queue
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Card being shown, or `None` once complete.
    pub fn current_card(&self) -> Option<&Card> {
        match self.phase {
            SessionPhase::Active => self.queue.get(self.current_index),
            SessionPhase::Complete => None,
        }
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn results(&self) -> &[CardResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// 1-based number of the card being shown.
    pub fn position(&self) -> usize {
        (self.current_index + 1).min(self.queue.len())
    }

    /// Cards left after the one being shown.
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.current_index + 1)
    }

    pub fn progress_percent(&self) -> f64 {
        if self.queue.is_empty() {
            return 0.0;
        }
        100.0 * self.current_index as f64 / self.queue.len() as f64
    }

    /// Toggle between question and answer. Ignored while advancing or complete.
    pub fn flip(&mut self) {
        if self.phase != SessionPhase::Active || self.advancing {
            tracing::debug!(phase = ?self.phase, advancing = self.advancing, "flip ignored");
            return;
        }
        self.side = self.side.flipped();
    }

    /// Record an answer for the revealed card.
    ///
    /// The recorder is called first; if it fails the session is unchanged.
    pub fn answer<A>(&mut self, correct: bool, recorder: &mut A) -> Result<AnswerOutcome>
    where
        A: AnswerRecorder + ?Sized,
    {
        if self.advancing || self.side != CardSide::Answer {
            tracing::debug!(
                advancing = self.advancing,
                side = ?self.side,
                "answer ignored"
            );
            return Ok(AnswerOutcome::Ignored);
        }
        let Some(card_id) = self.current_card().map(|c| c.id) else {
            tracing::debug!("answer ignored: no current card");
            return Ok(AnswerOutcome::Ignored);
        };

        let updated = recorder.record_answer(self.collection_id, card_id, correct)?;

        if correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
        self.results.push(CardResult { card_id, correct });
        self.current_index += 1;
        self.side = CardSide::Question;

        if self.current_index >= self.queue.len() {
            self.phase = SessionPhase::Complete;
            self.finished_at = Some(Utc::now());
            let summary = self.build_summary();
            tracing::debug!(
                correct = summary.correct,
                total = summary.total,
                percentage = summary.percentage,
                "practice session complete"
            );
            return Ok(AnswerOutcome::Completed { updated, summary });
        }

        self.advancing = true;
        Ok(AnswerOutcome::Advanced { updated })
    }

    /// Clear the advance guard once the visual transition is over.
    pub fn finish_advance(&mut self) {
        self.advancing = false;
    }

    /// Summary of the pass, available once complete.
    pub fn summary(&self) -> Option<SessionSummary> {
        self.is_complete().then(|| self.build_summary())
    }

    /// Begin a new pass over `cards`, normally the collection's current cards.
    ///
    /// An empty list is rejected and leaves the session as it was.
    pub fn restart<R>(&mut self, cards: &[Card], rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        let queue = build_practice_queue(cards, rng);
        if queue.is_empty() {
            return Err(CoreError::NoCards);
        }
        tracing::debug!(collection_id = %self.collection_id, cards = queue.len(), "practice session restarted");
        self.queue = queue;
        self.current_index = 0;
        self.side = CardSide::Question;
        self.phase = SessionPhase::Active;
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.results.clear();
        self.advancing = false;
        self.started_at = Utc::now();
        self.finished_at = None;
        Ok(())
    }

    fn build_summary(&self) -> SessionSummary {
        SessionSummary {
            collection_id: self.collection_id,
            total: self.queue.len(),
            correct: self.correct_count,
            incorrect: self.incorrect_count,
            percentage: score_percentage(self.correct_count, self.queue.len()),
            results: self.results.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at.unwrap_or(self.started_at),
        }
    }
}
