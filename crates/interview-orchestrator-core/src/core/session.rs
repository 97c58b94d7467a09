// crates/interview-orchestrator-core/src/core/session.rs
// ============================================================================
// Module: Session Documents
// Description: Read-only views over caller-owned session and turn documents.
// Purpose: Derive question identity, text, and turn metadata consistently.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! Sessions and turns arrive as JSON objects straight from the caller's
//! document store. This module is the only place that knows their field
//! names. Question identity is the first present of `id`, `questionId`, or
//! `_id` (plain string or `{"$oid": ...}`), falling back to `q{n}` by 1-based
//! position so unnamed questions stay addressable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::identifiers::QuestionId;
use crate::core::identifiers::TurnId;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Session field holding the persisted orchestration record.
pub const ORCHESTRATION_FIELD: &str = "orchestration";
/// Session field holding the ordered question list.
pub const QUESTIONS_FIELD: &str = "aiInterviewQuestions";
/// Default speaker role for turns that omit one.
pub const DEFAULT_TURN_ROLE: &str = "candidate";

// ============================================================================
// SECTION: Questions
// ============================================================================

/// One question from the session's question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionQuestion {
    /// Zero-based position in the session list.
    pub ordinal: usize,
    /// Derived identifier.
    pub id: QuestionId,
    /// Prompt text (empty when absent).
    pub text: String,
    /// Competency declared on the question, if any.
    pub competency_hint: Option<String>,
}

impl SessionQuestion {
    /// Builds a view over one question document.
    #[must_use]
    pub fn from_document(ordinal: usize, document: &Value) -> Self {
        Self {
            ordinal,
            id: stored_question_id(document).unwrap_or_else(|| QuestionId::from_ordinal(ordinal)),
            text: first_string(document, &["text", "question"]).unwrap_or_default(),
            competency_hint: first_string(document, &["competency"])
                .filter(|hint| !hint.trim().is_empty()),
        }
    }
}

/// Returns the session's questions in their original order.
///
/// A missing or non-array question list yields no questions.
#[must_use]
pub fn session_questions(session: &Map<String, Value>) -> Vec<SessionQuestion> {
    session
        .get(QUESTIONS_FIELD)
        .and_then(Value::as_array)
        .map(|questions| {
            questions
                .iter()
                .enumerate()
                .map(|(ordinal, document)| SessionQuestion::from_document(ordinal, document))
                .collect()
        })
        .unwrap_or_default()
}

/// Returns the identifier stored on a question document, if any.
fn stored_question_id(document: &Value) -> Option<QuestionId> {
    if let Some(id) = first_string(document, &["id", "questionId"]) {
        return Some(QuestionId::new(id));
    }
    match document.get("_id")? {
        Value::String(id) if !id.is_empty() => Some(QuestionId::new(id.clone())),
        Value::Object(object) => object
            .get("$oid")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(QuestionId::from),
        _ => None,
    }
}

// ============================================================================
// SECTION: Turns
// ============================================================================

/// Fields the engine reads from a turn document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInput {
    /// Answer text (empty when absent).
    pub text: String,
    /// Turn identifier from `turnId` or `id`.
    pub turn_id: Option<TurnId>,
    /// Speaker role.
    pub role: String,
}

impl TurnInput {
    /// Reads a turn document.
    #[must_use]
    pub fn from_object(turn: &Map<String, Value>) -> Self {
        let field = |name: &str| turn.get(name).and_then(Value::as_str).filter(|v| !v.is_empty());
        Self {
            text: turn.get("text").and_then(Value::as_str).unwrap_or_default().to_string(),
            turn_id: field("turnId").or_else(|| field("id")).map(TurnId::from),
            role: field("role").unwrap_or(DEFAULT_TURN_ROLE).to_string(),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the first non-empty string among the named fields.
fn first_string(document: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| document.get(*field).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
