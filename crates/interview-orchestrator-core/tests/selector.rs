//! Question selection tests for interview-orchestrator-core.
// crates/interview-orchestrator-core/tests/selector.rs
// ============================================================================
// Module: Question Selector Tests
// Description: Phase-specific ordering and ordinal tie-breaks.
// Purpose: Ensure the next question is chosen deterministically per phase.
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

use interview_orchestrator_core::Competency;
use interview_orchestrator_core::CompetencyCoverage;
use interview_orchestrator_core::Coverage;
use interview_orchestrator_core::Phase;
use interview_orchestrator_core::QuestionId;
use interview_orchestrator_core::SessionQuestion;
use interview_orchestrator_core::runtime::QuestionCandidate;
use interview_orchestrator_core::runtime::select_question;
use interview_orchestrator_core::runtime::selector::DEEP_DIVE_UNSCORED_PRIORITY;
use interview_orchestrator_core::runtime::selector::deep_dive_priority;

fn candidate(ordinal: usize, competency: &str) -> QuestionCandidate {
    QuestionCandidate {
        question: SessionQuestion {
            ordinal,
            id: QuestionId::from_ordinal(ordinal),
            text: format!("question {ordinal}"),
            competency_hint: Some(competency.to_string()),
        },
        competency: Competency::from(competency),
    }
}

fn coverage(entries: &[(&str, u32, f64)]) -> Coverage {
    entries
        .iter()
        .map(|(name, answer_count, average_score)| {
            (Competency::from(*name), CompetencyCoverage {
                answer_count: *answer_count,
                average_score: *average_score,
            })
        })
        .collect()
}

fn selected_ordinal(phase: Phase, candidates: &[QuestionCandidate], coverage: &Coverage) -> usize {
    select_question(phase, candidates, coverage).map(|c| c.question.ordinal).unwrap()
}

#[test]
fn empty_pool_selects_nothing() {
    for phase in Phase::ALL {
        assert!(select_question(phase, &[], &Coverage::new()).is_none());
    }
}

#[test]
fn sequential_phases_take_the_first_unanswered_question() {
    let candidates = vec![candidate(2, "sql"), candidate(4, "design"), candidate(5, "sql")];
    let coverage = coverage(&[("sql", 9, 1.0), ("design", 0, 0.0)]);
    for phase in [Phase::Intro, Phase::Calibration, Phase::WrapUp] {
        assert_eq!(selected_ordinal(phase, &candidates, &coverage), 2);
    }
}

#[test]
fn core_prefers_least_covered_competency() {
    let candidates = vec![candidate(1, "sql"), candidate(2, "design"), candidate(3, "testing")];
    let coverage = coverage(&[("sql", 2, 4.0), ("design", 1, 4.0)]);
    assert_eq!(selected_ordinal(Phase::Core, &candidates, &coverage), 3);
}

#[test]
fn core_ties_resolve_to_lowest_ordinal() {
    let candidates = vec![candidate(7, "design"), candidate(3, "sql"), candidate(5, "design")];
    let coverage = coverage(&[("sql", 1, 2.0), ("design", 1, 5.0)]);
    assert_eq!(selected_ordinal(Phase::Core, &candidates, &coverage), 3);
}

#[test]
fn deep_dive_prefers_weakest_scored_competency() {
    let candidates = vec![candidate(1, "sql"), candidate(2, "design"), candidate(3, "testing")];
    let coverage = coverage(&[("sql", 2, 3.5), ("design", 1, 2.25), ("testing", 1, 4.0)]);
    assert_eq!(selected_ordinal(Phase::DeepDive, &candidates, &coverage), 2);
}

#[test]
fn deep_dive_sorts_unscored_competencies_last() {
    let candidates = vec![candidate(1, "unseen"), candidate(2, "zeroed"), candidate(3, "sql")];
    let coverage = coverage(&[("zeroed", 1, 0.0), ("sql", 1, 4.5)]);
    assert_eq!(selected_ordinal(Phase::DeepDive, &candidates, &coverage), 3);
}

#[test]
fn deep_dive_ties_resolve_to_lowest_ordinal() {
    let candidates = vec![candidate(6, "unseen"), candidate(4, "other")];
    assert_eq!(selected_ordinal(Phase::DeepDive, &candidates, &Coverage::new()), 4);
}

#[test]
fn deep_dive_priority_uses_sentinel_for_non_positive_averages() {
    let coverage = coverage(&[("sql", 1, 2.5), ("zeroed", 1, 0.0)]);
    assert_eq!(deep_dive_priority(&coverage, &Competency::from("sql")), 2.5);
    assert_eq!(
        deep_dive_priority(&coverage, &Competency::from("zeroed")),
        DEEP_DIVE_UNSCORED_PRIORITY
    );
    assert_eq!(deep_dive_priority(&coverage, &Competency::from("missing")), 999.0);
}
