// crates/interview-orchestrator-core/src/runtime/signals.rs
// ============================================================================
// Module: Answer Signal Extraction
// Description: Pattern-based non-answer and fatigue classification.
// Purpose: Provide the default SignalClassifier implementation.
// Dependencies: crate::{core, interfaces}, regex, thiserror
// ============================================================================

//! ## Overview
//! Two independent classifiers run over the same trimmed answer text:
//!
//! - non-answer: three or fewer words, or a refusal/uncertainty phrase;
//! - fatigue: an explicit request to stop or a statement of tiredness.
//!
//! Matching is case-insensitive and word-bounded. The phrasing is
//! English-specific, so hosts with other languages should supply their own
//! [`SignalClassifier`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;
use regex::RegexBuilder;
use thiserror::Error;

use crate::core::SignalFlags;
use crate::interfaces::SignalClassifier;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Refusal and uncertainty phrasing.
pub const NON_ANSWER_PATTERN: &str =
    r"\b(i\s*(do\s*not|don['’]t)\s*know|not\s*sure|no\s*idea|pass|skip|next\s*question)\b";

/// Fatigue and termination phrasing.
pub const FATIGUE_PATTERN: &str =
    r"\b(tired|fatigue|fatigued|exhausted|drained|can\s*we\s*wrap|let['’]?s\s*finish|end\s*this)\b";

/// Answers with at most this many words are non-answers.
pub const NON_ANSWER_MAX_WORDS: usize = 3;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Raised when a classifier pattern fails to compile.
#[derive(Debug, Error)]
#[error("invalid signal pattern: {0}")]
pub struct SignalPatternError(String);

// ============================================================================
// SECTION: Classifier
// ============================================================================

/// Default regex-backed signal classifier.
#[derive(Debug, Clone)]
pub struct PatternSignalClassifier {
    /// Refusal/uncertainty matcher.
    non_answer: Regex,
    /// Fatigue matcher.
    fatigue: Regex,
}

impl PatternSignalClassifier {
    /// Builds the classifier with the built-in English patterns.
    ///
    /// # Errors
    ///
    /// Returns [`SignalPatternError`] if a built-in pattern fails to compile.
    pub fn new() -> Result<Self, SignalPatternError> {
        Self::with_patterns(NON_ANSWER_PATTERN, FATIGUE_PATTERN)
    }

    /// Builds the classifier with custom patterns, matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`SignalPatternError`] when either pattern is invalid.
    pub fn with_patterns(non_answer: &str, fatigue: &str) -> Result<Self, SignalPatternError> {
        Ok(Self {
            non_answer: compile(non_answer)?,
            fatigue: compile(fatigue)?,
        })
    }
}

impl SignalClassifier for PatternSignalClassifier {
    fn classify(&self, answer_text: &str) -> SignalFlags {
        let text = answer_text.trim();
        let word_count = text.split_whitespace().count();
        SignalFlags {
            is_non_answer: word_count <= NON_ANSWER_MAX_WORDS || self.non_answer.is_match(text),
            is_fatigued: self.fatigue.is_match(text),
        }
    }
}

/// Compiles a case-insensitive pattern.
fn compile(pattern: &str) -> Result<Regex, SignalPatternError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|err| SignalPatternError(err.to_string()))
}
