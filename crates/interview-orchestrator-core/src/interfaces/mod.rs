// crates/interview-orchestrator-core/src/interfaces/mod.rs
// ============================================================================
// Module: Interview Orchestrator Interfaces
// Description: Collaborator traits for scoring, classification, time, and audit.
// Purpose: Define the seams the engine uses to reach the outside world.
// Dependencies: crate::core, serde, thiserror, time
// ============================================================================

//! ## Overview
//! The engine performs no I/O of its own. Everything it needs from outside
//! (answer scoring, answer classification, the current time, and audit
//! output) arrives through the traits below, so hosts can plug in their own
//! implementations and tests can substitute deterministic stand-ins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::core::Competency;
use crate::core::CompetencyCoverage;
use crate::core::Coverage;
use crate::core::Difficulty;
use crate::core::EvidenceCandidate;
use crate::core::QuestionId;
use crate::core::SessionQuestion;
use crate::core::SignalFlags;
use crate::core::TurnId;
use crate::runtime::OrchestrationAuditEvent;

// ============================================================================
// SECTION: Scoring Adapter
// ============================================================================

/// Request handed to the scoring adapter for one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    /// Raw answer text.
    pub answer_text: String,
    /// Competency the answer is scored against.
    pub competency: Competency,
    /// Turn identifier, when provided.
    pub turn_id: Option<TurnId>,
    /// Question the answer is attributed to.
    pub question_id: Option<QuestionId>,
    /// Difficulty in effect for this turn.
    pub difficulty: Difficulty,
}

/// Scoring adapter result for one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreOutcome {
    /// Numeric score; must be finite.
    pub score: f64,
    /// Difficulty for the next turn.
    pub difficulty_after: Difficulty,
    /// Optional evidence snippet.
    pub evidence_candidate: Option<EvidenceCandidate>,
}

/// Scoring adapter errors.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    /// Adapter reported a failure.
    #[error("scoring adapter error: {0}")]
    Adapter(String),
    /// Adapter returned a NaN or infinite score.
    #[error("scoring adapter returned a non-finite score: {0}")]
    NonFiniteScore(f64),
}

/// Answer scoring collaborator.
///
/// Only [`ScoringAdapter::score_answer`] is required; the other capabilities
/// have defaults that hosts may override.
pub trait ScoringAdapter {
    /// Scores one answer.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError`] when the answer cannot be scored. The engine
    /// propagates the failure without retrying.
    fn score_answer(&self, request: &ScoreRequest) -> Result<ScoreOutcome, ScoringError>;

    /// Maps a question to its competency.
    ///
    /// Defaults to the competency declared on the question, else
    /// [`Competency::GENERAL`]. `None` means the answer has no matching
    /// question in the session list.
    fn infer_competency(&self, question: Option<&SessionQuestion>) -> Competency {
        question
            .and_then(|question| question.competency_hint.as_deref())
            .map(str::trim)
            .map_or_else(Competency::general, Competency::from)
    }

    /// Folds one score into coverage.
    ///
    /// Defaults to incrementing the competency's count and recomputing its
    /// running mean.
    fn build_coverage_update(
        &self,
        coverage: &Coverage,
        competency: &Competency,
        score: f64,
    ) -> Coverage {
        let mut updated = coverage.clone();
        let entry = updated.get(competency).copied().unwrap_or_default();
        updated.insert(competency.clone(), CompetencyCoverage::with_score(entry, score));
        updated
    }
}

// ============================================================================
// SECTION: Signal Classifier
// ============================================================================

/// Classifies answer text into behavioral flags.
pub trait SignalClassifier {
    /// Returns the flags for one answer.
    fn classify(&self, answer_text: &str) -> SignalFlags;
}

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Time source for transition and finalization timestamps.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Sink for per-operation audit events.
pub trait OrchestrationAuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, event: &OrchestrationAuditEvent);
}
