// crates/interview-orchestrator-core/src/runtime/policy.rs
// ============================================================================
// Module: Phase Transition Policy
// Description: Target-phase decision and regression-suppressing application.
// Purpose: Decide, on every engine call, which phase the interview is in.
// Dependencies: crate::core, time
// ============================================================================

//! ## Overview
//! [`decide_target_phase`] checks its rules in a fixed priority order and the
//! first match wins:
//!
//! 1. remaining time at or below the critical threshold -> `wrap_up`
//! 2. remaining time at or below the low threshold -> `wrap_up`
//! 3. fatigue or non-answer streak at threshold -> `wrap_up`
//! 4. no answers yet -> `intro`
//! 5. fewer answers than the calibration minimum -> `calibration`
//! 6. enough answered competencies with a high enough mean -> `deep_dive`
//! 7. enough answered competencies -> `core`
//! 8. otherwise -> `calibration`
//!
//! [`apply_phase_transition`] then refuses to move backwards unless the
//! target is `wrap_up`. Because `wrap_up` is the highest phase, every other
//! target is a regression from it, which makes `wrap_up` absorbing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::Coverage;
use crate::core::OrchestrationState;
use crate::core::Phase;
use crate::core::PhaseThresholds;
use crate::core::PhaseTransition;

// ============================================================================
// SECTION: Reasons
// ============================================================================

/// Rule that produced a target phase.
///
/// # Invariants
/// - Labels are stable; callers match on them in persisted reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionReason {
    /// Remaining time at or below the critical threshold.
    TimeRemainingCritical,
    /// Remaining time at or below the low threshold.
    TimeRemainingLow,
    /// Fatigue signals or the non-answer streak reached their threshold.
    FatigueOrNonAnswerThresholdMet,
    /// No answers have been scored yet.
    OpeningTurns,
    /// Fewer answers than the calibration minimum.
    CalibrationMinAnswersNotMet,
    /// Coverage breadth and mean score allow a deep dive.
    CoverageAndScoreReadyForDeepDive,
    /// Coverage breadth allows the core phase.
    CoreCoverageThresholdMet,
    /// No other rule matched.
    DefaultToCalibration,
}

impl TransitionReason {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeRemainingCritical => "time_remaining_critical",
            Self::TimeRemainingLow => "time_remaining_low",
            Self::FatigueOrNonAnswerThresholdMet => "fatigue_or_non_answer_threshold_met",
            Self::OpeningTurns => "opening_turns",
            Self::CalibrationMinAnswersNotMet => "calibration_min_answers_not_met",
            Self::CoverageAndScoreReadyForDeepDive => "coverage_and_score_ready_for_deep_dive",
            Self::CoreCoverageThresholdMet => "core_coverage_threshold_met",
            Self::DefaultToCalibration => "default_to_calibration",
        }
    }
}

/// Call site appended to composite transition reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionSite {
    /// Evaluation after scoring an answer.
    ScoreAnswer,
    /// Evaluation before selecting a question.
    NextQuestion,
    /// Forced wrap-up because the question pool is exhausted.
    NoQuestionsRemaining,
}

impl TransitionSite {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScoreAnswer => "score_answer",
            Self::NextQuestion => "next_question",
            Self::NoQuestionsRemaining => "no_questions_remaining",
        }
    }
}

// ============================================================================
// SECTION: Decision
// ============================================================================

/// Target phase and the rules that selected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseDecision {
    /// Phase the rules point at.
    pub target: Phase,
    /// Matching rules, in evaluation order.
    pub reasons: Vec<TransitionReason>,
}

impl PhaseDecision {
    /// Builds a single-reason decision.
    fn single(target: Phase, reason: TransitionReason) -> Self {
        Self {
            target,
            reasons: vec![reason],
        }
    }

    /// Returns `"{reasons joined by '|'}:{site}"`.
    #[must_use]
    pub fn composite_reason(&self, site: TransitionSite) -> String {
        let reasons =
            self.reasons.iter().map(|reason| reason.as_str()).collect::<Vec<_>>().join("|");
        format!("{reasons}:{}", site.as_str())
    }
}

/// Aggregate view of coverage used by the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageSummary {
    /// Competencies present in coverage.
    pub competency_count: usize,
    /// Competencies with at least one answer.
    pub answered_competency_count: usize,
    /// Mean of average scores across answered competencies, to two decimals.
    pub average_across_answered: f64,
}

/// Summarizes coverage for the deep-dive and core rules.
#[must_use]
pub fn coverage_summary(coverage: &Coverage) -> CoverageSummary {
    let answered =
        coverage.values().filter(|entry| entry.answer_count > 0).map(|entry| entry.average_score);
    let (count, total) = answered.fold((0_u32, 0.0_f64), |(count, total), score| {
        (count.saturating_add(1), total + score)
    });
    let average = if count == 0 { 0.0 } else { total / f64::from(count) };
    CoverageSummary {
        competency_count: coverage.len(),
        answered_competency_count: count as usize,
        average_across_answered: (average * 100.0).round() / 100.0,
    }
}

/// Decides the target phase for a state.
///
/// `time_remaining_sec` of `None` disables both time rules.
#[must_use]
pub fn decide_target_phase(
    state: &OrchestrationState,
    time_remaining_sec: Option<u64>,
    thresholds: &PhaseThresholds,
) -> PhaseDecision {
    if let Some(remaining) = time_remaining_sec {
        if remaining <= thresholds.critical_time_sec {
            return PhaseDecision::single(Phase::WrapUp, TransitionReason::TimeRemainingCritical);
        }
        if remaining <= thresholds.low_time_sec {
            return PhaseDecision::single(Phase::WrapUp, TransitionReason::TimeRemainingLow);
        }
    }

    if state.fatigue_signals >= thresholds.wrap_up_fatigue_signals
        || state.non_answer_streak >= thresholds.wrap_up_non_answer_streak
    {
        return PhaseDecision::single(
            Phase::WrapUp,
            TransitionReason::FatigueOrNonAnswerThresholdMet,
        );
    }

    let answers = state.answer_count();
    if answers == 0 {
        return PhaseDecision::single(Phase::Intro, TransitionReason::OpeningTurns);
    }
    if answers < thresholds.calibration_min_answers as usize {
        return PhaseDecision::single(
            Phase::Calibration,
            TransitionReason::CalibrationMinAnswersNotMet,
        );
    }

    let summary = coverage_summary(&state.coverage);
    if summary.answered_competency_count >= thresholds.deep_dive_min_competencies as usize
        && summary.average_across_answered >= thresholds.deep_dive_min_average
    {
        return PhaseDecision::single(
            Phase::DeepDive,
            TransitionReason::CoverageAndScoreReadyForDeepDive,
        );
    }
    if summary.answered_competency_count >= thresholds.core_min_competencies as usize {
        return PhaseDecision::single(Phase::Core, TransitionReason::CoreCoverageThresholdMet);
    }

    PhaseDecision::single(Phase::Calibration, TransitionReason::DefaultToCalibration)
}

// ============================================================================
// SECTION: Application
// ============================================================================

/// Returns the phase actually adopted for a target.
///
/// Regressions are suppressed unless the target is `wrap_up`.
#[must_use]
pub fn resolve_phase(current: Phase, target: Phase) -> Phase {
    if target < current && !target.is_terminal() { current } else { target }
}

/// Evaluates the policy and returns the transformed state.
///
/// The composite reason and timestamp are always recorded; the bounded
/// history logs only grow when the phase actually changes.
#[must_use]
pub fn apply_phase_transition(
    state: &OrchestrationState,
    time_remaining_sec: Option<u64>,
    site: TransitionSite,
    thresholds: &PhaseThresholds,
    at: OffsetDateTime,
) -> OrchestrationState {
    let decision = decide_target_phase(state, time_remaining_sec, thresholds);
    let next_phase = resolve_phase(state.phase, decision.target);
    commit(state, next_phase, decision.composite_reason(site), at)
}

/// Forces `wrap_up` after the question pool is exhausted.
///
/// The policy is still evaluated so the recorded reason explains the state
/// the interview was in when the pool ran dry.
#[must_use]
pub fn force_wrap_up(
    state: &OrchestrationState,
    time_remaining_sec: Option<u64>,
    thresholds: &PhaseThresholds,
    at: OffsetDateTime,
) -> OrchestrationState {
    let decision = decide_target_phase(state, time_remaining_sec, thresholds);
    commit(
        state,
        Phase::WrapUp,
        decision.composite_reason(TransitionSite::NoQuestionsRemaining),
        at,
    )
}

/// Writes the evaluation outcome onto a copy of the state.
fn commit(
    state: &OrchestrationState,
    next_phase: Phase,
    reason: String,
    at: OffsetDateTime,
) -> OrchestrationState {
    let mut next = state.clone();
    if next_phase != state.phase {
        next.record_phase_change(PhaseTransition {
            from: state.phase,
            to: next_phase,
            reason: reason.clone(),
            at,
        });
        next.phase = next_phase;
    }
    next.last_transition_reason = Some(reason);
    next.last_transition_at = Some(at);
    next
}
