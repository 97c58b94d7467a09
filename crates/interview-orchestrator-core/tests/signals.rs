//! Answer signal classification tests for interview-orchestrator-core.
// crates/interview-orchestrator-core/tests/signals.rs
// ============================================================================
// Module: Signal Classification Tests
// Description: Non-answer and fatigue detection over raw answer text.
// Purpose: Ensure the default classifier flags refusals, short answers, and
//          requests to stop without flagging substantive answers.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use interview_orchestrator_core::PatternSignalClassifier;
use interview_orchestrator_core::SignalClassifier;
use interview_orchestrator_core::SignalPatternError;

fn classifier() -> PatternSignalClassifier {
    PatternSignalClassifier::new().expect("built-in patterns compile")
}

#[test]
fn short_answers_are_non_answers() {
    let classifier = classifier();
    for text in ["", "   ", "yes", "maybe later", "use an index"] {
        assert!(classifier.classify(text).is_non_answer, "{text:?} should be a non-answer");
    }
}

#[test]
fn four_word_answers_are_not_non_answers_by_length() {
    let flags = classifier().classify("use a covering index");
    assert!(!flags.is_non_answer);
    assert!(!flags.is_fatigued);
}

#[test]
fn refusal_phrases_are_non_answers_regardless_of_length() {
    let classifier = classifier();
    for text in [
        "Honestly I do not know how that subsystem is deployed at all",
        "I don't know much about consensus protocols to be fair",
        "I don’t know much about consensus protocols to be fair",
        "I am not sure what the question is asking for here",
        "I have no idea how the scheduler picks a worker thread",
        "I think I will pass on this particular one for now",
        "Could we skip this one and come back to it later",
        "Can we move on to the next question please thanks",
    ] {
        assert!(classifier.classify(text).is_non_answer, "{text:?} should be a non-answer");
    }
}

#[test]
fn refusal_matching_is_case_insensitive() {
    assert!(classifier().classify("WELL, I DON'T KNOW THE ANSWER TO THAT").is_non_answer);
}

#[test]
fn refusal_words_inside_other_words_do_not_match() {
    let flags =
        classifier().classify("The compass library bypasses the passive skipper registry");
    assert!(!flags.is_non_answer);
}

#[test]
fn fatigue_phrases_are_flagged() {
    let classifier = classifier();
    for text in [
        "I am getting pretty tired after all of these questions",
        "There is some fatigue setting in on my side",
        "I feel fatigued and would like a short break",
        "Honestly I am exhausted from the previous round",
        "I am drained, it has been a very long day",
        "Can we wrap up soon, I have another meeting",
        "Let's finish here if that is alright with you",
        "Lets finish here if that is alright with you",
        "Let’s finish here if that is alright with you",
        "I would like to end this interview now please",
    ] {
        assert!(classifier.classify(text).is_fatigued, "{text:?} should be fatigued");
    }
}

#[test]
fn classifiers_are_independent() {
    let flags = classifier().classify("tired");
    assert!(flags.is_non_answer);
    assert!(flags.is_fatigued);

    let flags = classifier()
        .classify("I would shard the queue by customer and retry failed jobs with backoff");
    assert!(!flags.is_non_answer);
    assert!(!flags.is_fatigued);
}

#[test]
fn custom_patterns_replace_builtins() -> Result<(), SignalPatternError> {
    let classifier = PatternSignalClassifier::with_patterns(r"\bkeine ahnung\b", r"\bmüde\b")?;
    let flags = classifier.classify("Dazu habe ich leider keine Ahnung, tut mir leid");
    assert!(flags.is_non_answer);
    assert!(!flags.is_fatigued);
    let flags = classifier.classify("Ich bin jetzt wirklich sehr müde geworden heute");
    assert!(!flags.is_non_answer);
    assert!(flags.is_fatigued);
    Ok(())
}

#[test]
fn invalid_custom_pattern_is_rejected() {
    let result = PatternSignalClassifier::with_patterns("(unclosed", r"\btired\b");
    assert!(result.is_err());
}
