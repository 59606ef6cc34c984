//! Boundary to an LLM-backed question generator.
//!
//! The practice engine never calls a generator; cards produced by one are
//! persisted through [`CollectionService::add_generated_cards`] and practiced
//! like any other card.
//!
//! [`CollectionService::add_generated_cards`]: crate::collections::CollectionService::add_generated_cards

use serde_json::Value;

use crate::error::GenerationError;
use crate::types::GeneratedQuestion;

/// Parameters for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub count: usize,
    pub collection_title: Option<String>,
}

/// Produces question/answer pairs from a prompt.
pub trait QuestionGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedQuestion>, GenerationError>;
}

/// Instructions sent ahead of the user prompt.
pub fn system_prompt(count: usize) -> String {
    format!(
        r#"You are an expert educational content creator. Generate exactly {count} high-quality flashcard questions and answers based on the user's prompt.

Rules:
1. Return ONLY a valid JSON array of objects with "question" and "answer" properties
2. Each question should be clear, concise, and educational
3. Each answer should be accurate and complete but not overly long
4. Questions should vary in difficulty and style
5. Make questions engaging and memorable
6. No additional text, explanations, or formatting outside the JSON array

Example format:
[
  {{"question": "What is the capital of France?", "answer": "Paris"}},
  {{"question": "Who wrote Romeo and Juliet?", "answer": "William Shakespeare"}}
]"#
    )
}

pub fn user_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "Generate {} flashcard questions about: {}",
        request.count, request.prompt
    );
    if let Some(title) = &request.collection_title {
        prompt.push_str(&format!(" (for collection: \"{title}\")"));
    }
    prompt
}

/// Parse a generator's JSON array response.
///
/// Entries without a non-blank string `question` and `answer` are dropped;
/// the result is truncated to `count`.
pub fn parse_generated_questions(
    content: &str,
    count: usize,
) -> Result<Vec<GeneratedQuestion>, GenerationError> {
    if content.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(content)?;
    let items = match value {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err(GenerationError::InvalidFormat),
    };

    let valid: Vec<GeneratedQuestion> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<GeneratedQuestion>(item).ok())
        .filter(|q| !q.question.trim().is_empty() && !q.answer.trim().is_empty())
        .take(count)
        .collect();

    if valid.is_empty() {
        return Err(GenerationError::NoValidQuestions);
    }

    Ok(valid)
}
