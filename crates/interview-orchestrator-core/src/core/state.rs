// crates/interview-orchestrator-core/src/core/state.rs
// ============================================================================
// Module: Orchestration State
// Description: Persisted orchestration record, coverage, and turn assessments.
// Purpose: Capture the full interview progression the caller persists.
// Dependencies: crate::core::{config, identifiers, phase}, serde, time
// ============================================================================

//! ## Overview
//! [`OrchestrationState`] is owned by the caller's session record. The engine
//! only ever transforms copies of it. Field names serialize in camelCase so
//! the record round-trips through the session document unchanged.
//!
//! Bounded logs drop their oldest entries silently once past their caps; see
//! [`push_bounded`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::config::VersionTags;
use crate::core::identifiers::Competency;
use crate::core::identifiers::QuestionId;
use crate::core::identifiers::TurnId;
use crate::core::phase::Difficulty;
use crate::core::phase::Phase;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum retained phase history entries.
pub const PHASE_HISTORY_LIMIT: usize = 30;
/// Maximum retained transition reasons.
pub const TRANSITION_REASONS_LIMIT: usize = 50;
/// Maximum retained evidence candidates.
pub const EVIDENCE_CANDIDATES_LIMIT: usize = 12;

// ============================================================================
// SECTION: Coverage
// ============================================================================

/// Per-competency coverage aggregate.
///
/// # Invariants
/// - `average_score` is the running mean of all scores recorded for the
///   competency; it is `0.0` while `answer_count` is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyCoverage {
    /// Number of scored answers.
    pub answer_count: u32,
    /// Running mean score.
    pub average_score: f64,
}

impl CompetencyCoverage {
    /// Returns the aggregate after folding in one more score.
    #[must_use]
    pub fn with_score(self, score: f64) -> Self {
        let count = f64::from(self.answer_count);
        Self {
            answer_count: self.answer_count.saturating_add(1),
            average_score: self.average_score.mul_add(count, score) / (count + 1.0),
        }
    }
}

/// Coverage map keyed by competency.
pub type Coverage = BTreeMap<Competency, CompetencyCoverage>;

// ============================================================================
// SECTION: Signals
// ============================================================================

/// Behavioral flags extracted from one answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalFlags {
    /// Answer is too short or a refusal/uncertainty phrase.
    pub is_non_answer: bool,
    /// Answer asks to stop or expresses fatigue.
    pub is_fatigued: bool,
}

// ============================================================================
// SECTION: Assessments
// ============================================================================

/// Quoted snippet offered by the scoring adapter as evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceCandidate {
    /// Quoted answer excerpt.
    pub quote: String,
    /// Competency the quote supports.
    #[serde(default)]
    pub competency: Option<Competency>,
    /// Turn the quote was taken from.
    #[serde(default)]
    pub turn_id: Option<TurnId>,
}

impl EvidenceCandidate {
    /// Returns true when the quote has visible content.
    #[must_use]
    pub fn has_quote(&self) -> bool {
        !self.quote.trim().is_empty()
    }
}

/// Assessment recorded for one scored turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnAssessment {
    /// Turn identifier, when provided.
    pub turn_id: Option<TurnId>,
    /// Question the answer was attributed to.
    pub question_id: Option<QuestionId>,
    /// Competency the answer was scored against.
    pub competency: Competency,
    /// Difficulty in effect when the answer was scored.
    pub difficulty_before: Difficulty,
    /// Numeric score from the scoring adapter.
    pub score: f64,
    /// Difficulty the adapter selected for the next turn.
    pub difficulty_after: Difficulty,
    /// Evidence snippet, when the adapter offered one.
    pub evidence_candidate: Option<EvidenceCandidate>,
}

// ============================================================================
// SECTION: Phase History
// ============================================================================

/// One recorded phase change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// Phase before the change.
    pub from: Phase,
    /// Phase after the change.
    pub to: Phase,
    /// Composite transition reason.
    pub reason: String,
    /// When the change was applied.
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

// ============================================================================
// SECTION: Orchestration State
// ============================================================================

/// Orchestration record persisted with the session.
///
/// # Invariants
/// - `phase_history.len() <= PHASE_HISTORY_LIMIT`.
/// - `transition_reasons.len() <= TRANSITION_REASONS_LIMIT`.
/// - `evidence_candidates.len() <= EVIDENCE_CANDIDATES_LIMIT`.
/// - `asked_question_ids` holds each identifier at most once and only grows.
/// - Once `phase` is [`Phase::WrapUp`] it never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationState {
    /// Current phase.
    pub phase: Phase,
    /// Recent phase changes, oldest first.
    pub phase_history: Vec<PhaseTransition>,
    /// Recent transition reasons for phase changes, oldest first.
    pub transition_reasons: Vec<String>,
    /// Session start.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    /// Session end, set by finalization.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    /// Elapsed seconds, set by finalization.
    pub duration_sec: Option<u64>,
    /// Prompt version tag.
    pub prompt_version: String,
    /// Rubric version tag.
    pub rubric_version: String,
    /// Scoring version tag.
    pub scoring_version: String,
    /// Contract version tag.
    pub contract_version: String,
    /// Per-competency coverage.
    pub coverage: Coverage,
    /// Current difficulty tier.
    pub difficulty: Difficulty,
    /// Recent evidence candidates, oldest first.
    pub evidence_candidates: Vec<EvidenceCandidate>,
    /// Every scored turn, oldest first.
    pub turn_assessments: Vec<TurnAssessment>,
    /// Questions already scored, in first-asked order.
    pub asked_question_ids: Vec<QuestionId>,
    /// Last question selected or scored.
    pub last_question_id: Option<QuestionId>,
    /// Answers classified as fatigued.
    pub fatigue_signals: u32,
    /// Answers classified as non-answers.
    pub non_answer_signals: u32,
    /// Consecutive non-answers ending at the latest turn.
    pub non_answer_streak: u32,
    /// Composite reason of the last transition evaluation.
    pub last_transition_reason: Option<String>,
    /// When the last transition evaluation ran.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_transition_at: Option<OffsetDateTime>,
}

impl OrchestrationState {
    /// Returns a fresh state stamped with the given version tags.
    #[must_use]
    pub fn fresh(versions: &VersionTags) -> Self {
        Self {
            phase: Phase::Intro,
            phase_history: Vec::new(),
            transition_reasons: Vec::new(),
            started_at: None,
            ended_at: None,
            duration_sec: None,
            prompt_version: versions.prompt_version.clone(),
            rubric_version: versions.rubric_version.clone(),
            scoring_version: versions.scoring_version.clone(),
            contract_version: versions.contract_version.clone(),
            coverage: Coverage::new(),
            difficulty: Difficulty::Medium,
            evidence_candidates: Vec::new(),
            turn_assessments: Vec::new(),
            asked_question_ids: Vec::new(),
            last_question_id: None,
            fatigue_signals: 0,
            non_answer_signals: 0,
            non_answer_streak: 0,
            last_transition_reason: None,
            last_transition_at: None,
        }
    }

    /// Returns the number of scored answers.
    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.turn_assessments.len()
    }

    /// Returns true when the question has already been scored.
    #[must_use]
    pub fn has_asked(&self, question_id: &QuestionId) -> bool {
        self.asked_question_ids.contains(question_id)
    }

    /// Registers a scored question; duplicates are ignored.
    pub fn register_asked(&mut self, question_id: QuestionId) {
        if !self.has_asked(&question_id) {
            self.asked_question_ids.push(question_id);
        }
    }

    /// Appends an evidence candidate within the retention cap.
    pub fn push_evidence(&mut self, candidate: EvidenceCandidate) {
        push_bounded(&mut self.evidence_candidates, candidate, EVIDENCE_CANDIDATES_LIMIT);
    }

    /// Records a phase change in both bounded logs.
    pub fn record_phase_change(&mut self, transition: PhaseTransition) {
        push_bounded(
            &mut self.transition_reasons,
            transition.reason.clone(),
            TRANSITION_REASONS_LIMIT,
        );
        push_bounded(&mut self.phase_history, transition, PHASE_HISTORY_LIMIT);
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends an item and drops the oldest entries beyond `limit`.
pub fn push_bounded<T>(items: &mut Vec<T>, item: T, limit: usize) {
    items.push(item);
    truncate_oldest(items, limit);
}

/// Drops the oldest entries beyond `limit`.
pub fn truncate_oldest<T>(items: &mut Vec<T>, limit: usize) {
    if items.len() > limit {
        let excess = items.len() - limit;
        items.drain(.. excess);
    }
}
