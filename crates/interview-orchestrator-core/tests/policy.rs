//! Phase transition policy tests for interview-orchestrator-core.
// crates/interview-orchestrator-core/tests/policy.rs
// ============================================================================
// Module: Phase Transition Policy Tests
// Description: Rule priority, regression suppression, and history logging.
// Purpose: Ensure phase decisions are deterministic and wrap_up is absorbing.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::float_cmp,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use interview_orchestrator_core::Competency;
use interview_orchestrator_core::CompetencyCoverage;
use interview_orchestrator_core::Difficulty;
use interview_orchestrator_core::OrchestrationState;
use interview_orchestrator_core::PHASE_HISTORY_LIMIT;
use interview_orchestrator_core::Phase;
use interview_orchestrator_core::PhaseThresholds;
use interview_orchestrator_core::TRANSITION_REASONS_LIMIT;
use interview_orchestrator_core::TransitionReason;
use interview_orchestrator_core::TransitionSite;
use interview_orchestrator_core::TurnAssessment;
use interview_orchestrator_core::VersionTags;
use interview_orchestrator_core::runtime::apply_phase_transition;
use interview_orchestrator_core::runtime::coverage_summary;
use interview_orchestrator_core::runtime::decide_target_phase;
use interview_orchestrator_core::runtime::force_wrap_up;

fn state_with_answers(count: usize) -> OrchestrationState {
    let mut state = OrchestrationState::fresh(&VersionTags::default());
    for _ in 0 .. count {
        state.turn_assessments.push(TurnAssessment {
            turn_id: None,
            question_id: None,
            competency: Competency::general(),
            difficulty_before: Difficulty::Medium,
            score: 3.0,
            difficulty_after: Difficulty::Medium,
            evidence_candidate: None,
        });
    }
    state
}

fn cover(state: &mut OrchestrationState, competency: &str, answer_count: u32, average: f64) {
    state.coverage.insert(Competency::from(competency), CompetencyCoverage {
        answer_count,
        average_score: average,
    });
}

#[test]
fn critical_time_wins_over_every_other_rule() {
    let mut state = state_with_answers(0);
    state.fatigue_signals = 5;
    let decision = decide_target_phase(&state, Some(45), &PhaseThresholds::default());
    assert_eq!(decision.target, Phase::WrapUp);
    assert_eq!(decision.reasons, vec![TransitionReason::TimeRemainingCritical]);
}

#[test]
fn low_time_applies_between_thresholds() {
    let state = state_with_answers(0);
    let decision = decide_target_phase(&state, Some(46), &PhaseThresholds::default());
    assert_eq!(decision.reasons, vec![TransitionReason::TimeRemainingLow]);
    let decision = decide_target_phase(&state, Some(120), &PhaseThresholds::default());
    assert_eq!(decision.reasons, vec![TransitionReason::TimeRemainingLow]);
    let decision = decide_target_phase(&state, Some(121), &PhaseThresholds::default());
    assert_eq!(decision.reasons, vec![TransitionReason::OpeningTurns]);
}

#[test]
fn absent_time_disables_time_rules() {
    let decision = decide_target_phase(&state_with_answers(0), None, &PhaseThresholds::default());
    assert_eq!(decision.target, Phase::Intro);
    assert_eq!(decision.reasons, vec![TransitionReason::OpeningTurns]);
}

#[test]
fn fatigue_or_streak_forces_wrap_up() {
    let mut state = state_with_answers(1);
    state.fatigue_signals = 2;
    let decision = decide_target_phase(&state, Some(600), &PhaseThresholds::default());
    assert_eq!(decision.reasons, vec![TransitionReason::FatigueOrNonAnswerThresholdMet]);

    let mut state = state_with_answers(1);
    state.non_answer_streak = 2;
    let decision = decide_target_phase(&state, None, &PhaseThresholds::default());
    assert_eq!(decision.target, Phase::WrapUp);
}

#[test]
fn calibration_holds_until_minimum_answers() {
    let mut state = state_with_answers(1);
    cover(&mut state, "sql", 1, 5.0);
    let decision = decide_target_phase(&state, None, &PhaseThresholds::default());
    assert_eq!(decision.target, Phase::Calibration);
    assert_eq!(decision.reasons, vec![TransitionReason::CalibrationMinAnswersNotMet]);
}

#[test]
fn deep_dive_requires_breadth_and_average() {
    let mut state = state_with_answers(3);
    cover(&mut state, "sql", 1, 4.0);
    cover(&mut state, "design", 1, 4.0);
    cover(&mut state, "testing", 1, 4.0);
    let decision = decide_target_phase(&state, Some(900), &PhaseThresholds::default());
    assert_eq!(decision.target, Phase::DeepDive);
    assert_eq!(decision.reasons, vec![TransitionReason::CoverageAndScoreReadyForDeepDive]);

    cover(&mut state, "testing", 1, 0.5);
    let decision = decide_target_phase(&state, Some(900), &PhaseThresholds::default());
    assert_eq!(decision.target, Phase::Core);
    assert_eq!(decision.reasons, vec![TransitionReason::CoreCoverageThresholdMet]);
}

#[test]
fn unanswered_competencies_do_not_count_toward_breadth() {
    let mut state = state_with_answers(2);
    cover(&mut state, "sql", 2, 4.0);
    cover(&mut state, "design", 0, 0.0);
    let decision = decide_target_phase(&state, None, &PhaseThresholds::default());
    assert_eq!(decision.target, Phase::Calibration);
    assert_eq!(decision.reasons, vec![TransitionReason::DefaultToCalibration]);
}

#[test]
fn coverage_summary_rounds_average_to_two_decimals() {
    let mut state = state_with_answers(0);
    cover(&mut state, "a", 1, 2.994);
    cover(&mut state, "b", 1, 3.0);
    cover(&mut state, "c", 1, 3.0);
    cover(&mut state, "d", 0, 0.0);
    let summary = coverage_summary(&state.coverage);
    assert_eq!(summary.competency_count, 4);
    assert_eq!(summary.answered_competency_count, 3);
    assert_eq!(summary.average_across_answered, 3.0);
}

#[test]
fn rounded_average_can_reach_the_deep_dive_threshold() {
    let mut state = state_with_answers(3);
    cover(&mut state, "a", 1, 2.994);
    cover(&mut state, "b", 1, 3.0);
    cover(&mut state, "c", 1, 3.0);
    let decision = decide_target_phase(&state, None, &PhaseThresholds::default());
    assert_eq!(decision.target, Phase::DeepDive);
}

#[test]
fn regression_is_suppressed_but_reason_is_recorded() {
    let mut state = state_with_answers(1);
    state.phase = Phase::Core;
    let at = common::fixed_now();
    let next = apply_phase_transition(
        &state,
        None,
        TransitionSite::NextQuestion,
        &PhaseThresholds::default(),
        at,
    );
    assert_eq!(next.phase, Phase::Core);
    assert_eq!(
        next.last_transition_reason.as_deref(),
        Some("calibration_min_answers_not_met:next_question")
    );
    assert_eq!(next.last_transition_at, Some(at));
    assert!(next.phase_history.is_empty());
    assert!(next.transition_reasons.is_empty());
}

#[test]
fn phase_change_appends_history_and_reason() {
    let state = state_with_answers(1);
    let at = common::fixed_now();
    let next = apply_phase_transition(
        &state,
        None,
        TransitionSite::ScoreAnswer,
        &PhaseThresholds::default(),
        at,
    );
    assert_eq!(next.phase, Phase::Calibration);
    assert_eq!(next.phase_history.len(), 1);
    let entry = &next.phase_history[0];
    assert_eq!(entry.from, Phase::Intro);
    assert_eq!(entry.to, Phase::Calibration);
    assert_eq!(entry.reason, "calibration_min_answers_not_met:score_answer");
    assert_eq!(entry.at, at);
    assert_eq!(next.transition_reasons, vec![entry.reason.clone()]);
}

#[test]
fn wrap_up_is_absorbing_even_with_zero_answers() {
    let mut state = state_with_answers(0);
    state.phase = Phase::WrapUp;
    let next = apply_phase_transition(
        &state,
        Some(10_000),
        TransitionSite::NextQuestion,
        &PhaseThresholds::default(),
        common::fixed_now(),
    );
    assert_eq!(next.phase, Phase::WrapUp);
    assert_eq!(next.last_transition_reason.as_deref(), Some("opening_turns:next_question"));
}

#[test]
fn wrap_up_target_overrides_any_phase() {
    for phase in Phase::ALL {
        let mut state = state_with_answers(4);
        state.phase = phase;
        let next = apply_phase_transition(
            &state,
            Some(10),
            TransitionSite::ScoreAnswer,
            &PhaseThresholds::default(),
            common::fixed_now(),
        );
        assert_eq!(next.phase, Phase::WrapUp, "from {phase}");
    }
}

#[test]
fn forced_wrap_up_keeps_policy_reasons_with_site_suffix() {
    let mut state = state_with_answers(3);
    state.phase = Phase::Core;
    cover(&mut state, "sql", 2, 2.0);
    cover(&mut state, "design", 1, 2.0);
    let next = force_wrap_up(&state, Some(600), &PhaseThresholds::default(), common::fixed_now());
    assert_eq!(next.phase, Phase::WrapUp);
    assert_eq!(
        next.last_transition_reason.as_deref(),
        Some("core_coverage_threshold_met:no_questions_remaining")
    );
    assert_eq!(next.phase_history.len(), 1);
    assert_eq!(next.phase_history[0].from, Phase::Core);
}

#[test]
fn history_logs_are_capped() {
    let mut state = state_with_answers(0);
    let thresholds = PhaseThresholds::default();
    for _ in 0 .. 40 {
        state.phase = Phase::Intro;
        state.turn_assessments.clear();
        state = apply_phase_transition(
            &state,
            Some(1),
            TransitionSite::NextQuestion,
            &thresholds,
            common::fixed_now(),
        );
    }
    assert_eq!(state.phase_history.len(), PHASE_HISTORY_LIMIT);
    assert_eq!(state.transition_reasons.len(), 40.min(TRANSITION_REASONS_LIMIT));
}

#[test]
fn reason_labels_are_stable() {
    let labels = [
        (TransitionReason::TimeRemainingCritical, "time_remaining_critical"),
        (TransitionReason::TimeRemainingLow, "time_remaining_low"),
        (TransitionReason::FatigueOrNonAnswerThresholdMet, "fatigue_or_non_answer_threshold_met"),
        (TransitionReason::OpeningTurns, "opening_turns"),
        (TransitionReason::CalibrationMinAnswersNotMet, "calibration_min_answers_not_met"),
        (
            TransitionReason::CoverageAndScoreReadyForDeepDive,
            "coverage_and_score_ready_for_deep_dive",
        ),
        (TransitionReason::CoreCoverageThresholdMet, "core_coverage_threshold_met"),
        (TransitionReason::DefaultToCalibration, "default_to_calibration"),
    ];
    for (reason, label) in labels {
        assert_eq!(reason.as_str(), label);
    }
}
