//! Core flashcard practice library.
//!
//! Provides:
//! - Weight model mapping answer history to a sampling weight
//! - Weighted shuffle producing one practice pass
//! - Practice session state machine
//! - Collection/card mutations over a pluggable store
//! - Question-generation boundary (prompts and response validation)

pub mod collections;
pub mod error;
pub mod generation;
pub mod session;
pub mod shuffle;
pub mod types;
pub mod weight;

pub use collections::{CollectionService, CollectionStore, MemoryStore};
pub use error::{CoreError, GenerationError, Result, StoreError};
pub use generation::{parse_generated_questions, GenerationRequest, QuestionGenerator};
pub use session::{
    score_percentage, AnswerOutcome, AnswerRecorder, CardSide, PracticeSession, SessionPhase,
    SessionSummary,
};
pub use shuffle::{build_practice_queue, build_practice_queue_with_thread_rng};
pub use types::{
    Card, CardPatch, CardResult, Collection, CollectionPatch, GeneratedQuestion, COLLECTION_COLORS,
};
pub use weight::{calculate_weight, pool_copies, success_rate};
