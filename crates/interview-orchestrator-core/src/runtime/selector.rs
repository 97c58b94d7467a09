// crates/interview-orchestrator-core/src/runtime/selector.rs
// ============================================================================
// Module: Question Selector
// Description: Phase-specific ordering over unanswered session questions.
// Purpose: Pick the next question deterministically.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Candidates arrive in session order with their competency already inferred.
//! Opening and closing phases take the first candidate. The core phase favours
//! the least-covered competency, and deep-dive favours the weakest-scoring
//! one. Every ordering falls back to the session ordinal, so ties always
//! resolve to the earliest question.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Competency;
use crate::core::Coverage;
use crate::core::Phase;
use crate::core::SessionQuestion;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Deep-dive priority for competencies without a positive average.
///
/// Unscored competencies sort after every scored one.
pub const DEEP_DIVE_UNSCORED_PRIORITY: f64 = 999.0;

// ============================================================================
// SECTION: Candidates
// ============================================================================

/// Unanswered question paired with its inferred competency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCandidate {
    /// Session question view.
    pub question: SessionQuestion,
    /// Competency the scoring adapter assigned.
    pub competency: Competency,
}

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Selects the next question for a phase, or `None` when none remain.
#[must_use]
pub fn select_question<'a>(
    phase: Phase,
    candidates: &'a [QuestionCandidate],
    coverage: &Coverage,
) -> Option<&'a QuestionCandidate> {
    match phase {
        Phase::Intro | Phase::Calibration | Phase::WrapUp => {
            candidates.iter().min_by_key(|candidate| candidate.question.ordinal)
        }
        Phase::Core => candidates.iter().min_by_key(|candidate| {
            let answers = coverage.get(&candidate.competency).map_or(0, |entry| entry.answer_count);
            (answers, candidate.question.ordinal)
        }),
        Phase::DeepDive => candidates.iter().min_by(|left, right| {
            deep_dive_priority(coverage, &left.competency)
                .total_cmp(&deep_dive_priority(coverage, &right.competency))
                .then_with(|| left.question.ordinal.cmp(&right.question.ordinal))
        }),
    }
}

/// Returns the deep-dive priority of a competency; lower is asked first.
#[must_use]
pub fn deep_dive_priority(coverage: &Coverage, competency: &Competency) -> f64 {
    coverage
        .get(competency)
        .map(|entry| entry.average_score)
        .filter(|average| *average > 0.0)
        .unwrap_or(DEEP_DIVE_UNSCORED_PRIORITY)
}
