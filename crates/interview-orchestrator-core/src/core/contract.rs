// crates/interview-orchestrator-core/src/core/contract.rs
// ============================================================================
// Module: Contract Envelopes
// Description: Versioned metadata blocks attached to engine responses.
// Purpose: Give downstream services a stable shape to verify against.
// Dependencies: crate::core::{hashing, identifiers, phase}, serde
// ============================================================================

//! ## Overview
//! Every `score_answer` and `next_question` result carries a
//! [`ContractEnvelope`] echoing the request fields that drove the decision and
//! summarizing the decision itself. Consumers must refuse a response whose
//! envelope version differs from the one they were built against; see
//! [`ContractEnvelope::ensure_version`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::hashing::ContentDigest;
use crate::core::hashing::canonical_digest;
use crate::core::identifiers::Competency;
use crate::core::identifiers::QuestionId;
use crate::core::identifiers::TurnId;
use crate::core::phase::Difficulty;
use crate::core::phase::Phase;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Contract version produced by this engine.
pub const CONTRACT_VERSION: &str = "orchestration-contract-v2";
/// Envelope name for answer scoring.
pub const SCORE_ANSWER_CONTRACT: &str = "score_answer";
/// Envelope name for question retrieval.
pub const NEXT_QUESTION_CONTRACT: &str = "next_question";

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Versioned envelope wrapping an engine decision.
///
/// # Invariants
/// - `version` is [`CONTRACT_VERSION`] for envelopes built by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEnvelope<I, O> {
    /// Operation name.
    pub name: String,
    /// Contract version.
    pub version: String,
    /// Echoed request fields.
    pub input: I,
    /// Decision summary.
    pub output: O,
}

impl<I, O> ContractEnvelope<I, O> {
    /// Creates an envelope stamped with [`CONTRACT_VERSION`].
    #[must_use]
    pub fn new(name: impl Into<String>, input: I, output: O) -> Self {
        Self {
            name: name.into(),
            version: CONTRACT_VERSION.to_string(),
            input,
            output,
        }
    }

    /// Checks the envelope against the version a consumer expects.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::VersionMismatch`] when versions differ.
    pub fn ensure_version(&self, expected: &str) -> Result<(), ContractError> {
        if self.version == expected {
            Ok(())
        } else {
            Err(ContractError::VersionMismatch {
                expected: expected.to_string(),
                actual: self.version.clone(),
            })
        }
    }
}

impl<I: Serialize, O: Serialize> ContractEnvelope<I, O> {
    /// Returns the canonical SHA-256 digest of the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Digest`] when canonicalization fails.
    pub fn canonical_hash(&self) -> Result<ContentDigest, ContractError> {
        canonical_digest(self).map_err(|err| ContractError::Digest(err.to_string()))
    }
}

/// Contract verification errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    /// Envelope version differs from the expected version.
    #[error("contract version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version the consumer expects.
        expected: String,
        /// Version carried by the envelope.
        actual: String,
    },
    /// Canonical digest could not be computed.
    #[error("contract digest failed: {0}")]
    Digest(String),
}

// ============================================================================
// SECTION: score_answer Payloads
// ============================================================================

/// Request fields echoed by the `score_answer` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAnswerContractInput {
    /// Normalized remaining time, when provided.
    pub time_remaining_sec: Option<u64>,
    /// Turn identifier, when provided.
    pub turn_id: Option<TurnId>,
    /// Speaker role for the turn.
    pub role: String,
}

/// Decision summary for `score_answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAnswerContractOutput {
    /// Phase after the transition evaluation.
    pub phase: Phase,
    /// Difficulty after scoring.
    pub difficulty: Difficulty,
    /// Competencies present in coverage.
    pub coverage_competencies: Vec<Competency>,
    /// Composite reason of the last transition evaluation.
    pub last_transition_reason: Option<String>,
}

/// `score_answer` envelope.
pub type ScoreAnswerContract =
    ContractEnvelope<ScoreAnswerContractInput, ScoreAnswerContractOutput>;

// ============================================================================
// SECTION: next_question Payloads
// ============================================================================

/// Request fields echoed by the `next_question` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionContractInput {
    /// Normalized remaining time, when provided.
    pub time_remaining_sec: Option<u64>,
    /// Phase the question was selected under; absent when none remained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<Phase>,
}

/// Decision summary for `next_question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionContractOutput {
    /// Selected question, or `None` when the pool is exhausted.
    pub question_id: Option<QuestionId>,
    /// Competency of the selected question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competency: Option<Competency>,
    /// Phase after the transition evaluation.
    pub phase: Phase,
    /// Composite reason of the last transition evaluation.
    pub transition_reason: Option<String>,
}

/// `next_question` envelope.
pub type NextQuestionContract =
    ContractEnvelope<NextQuestionContractInput, NextQuestionContractOutput>;
