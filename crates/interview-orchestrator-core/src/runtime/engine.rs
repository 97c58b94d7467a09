// crates/interview-orchestrator-core/src/runtime/engine.rs
// ============================================================================
// Module: Orchestration Engine
// Description: Score, next-question, and finalize operations over sessions.
// Purpose: Combine state restoration, scoring, policy, and selection.
// Dependencies: crate::{core, interfaces, runtime}, serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! [`Orchestrator`] is a pure state transformer. Each operation restores the
//! session's orchestration record, computes a new record, and returns it
//! alongside a versioned contract envelope; nothing is persisted. The engine
//! holds only immutable configuration and its collaborators, so one value can
//! serve many sessions. Callers serialize calls per session.
//!
//! Input shape is checked before any state work: sessions and turns must be
//! JSON objects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

use crate::core::Competency;
use crate::core::ContractEnvelope;
use crate::core::NextQuestionContract;
use crate::core::NextQuestionContractInput;
use crate::core::NextQuestionContractOutput;
use crate::core::OrchestrationState;
use crate::core::OrchestratorConfig;
use crate::core::Phase;
use crate::core::QuestionId;
use crate::core::ScoreAnswerContract;
use crate::core::ScoreAnswerContractInput;
use crate::core::ScoreAnswerContractOutput;
use crate::core::SignalFlags;
use crate::core::TurnAssessment;
use crate::core::TurnInput;
use crate::core::contract::CONTRACT_VERSION;
use crate::core::contract::NEXT_QUESTION_CONTRACT;
use crate::core::contract::SCORE_ANSWER_CONTRACT;
use crate::core::session_questions;
use crate::core::timestamps::elapsed_seconds;
use crate::interfaces::Clock;
use crate::interfaces::OrchestrationAuditSink;
use crate::interfaces::ScoreRequest;
use crate::interfaces::ScoringAdapter;
use crate::interfaces::ScoringError;
use crate::interfaces::SignalClassifier;
use crate::runtime::audit::NoopAuditSink;
use crate::runtime::audit::ORCHESTRATION_AUDIT_EVENT;
use crate::runtime::audit::OrchestrationAuditEvent;
use crate::runtime::builder::build_state;
use crate::runtime::policy::TransitionSite;
use crate::runtime::policy::apply_phase_transition;
use crate::runtime::policy::force_wrap_up;
use crate::runtime::selector::QuestionCandidate;
use crate::runtime::selector::select_question;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Largest accepted remaining-time value in seconds.
pub const MAX_TIME_REMAINING_SEC: u64 = 1_000_000_000_000;

/// Operation label for answer scoring.
const OPERATION_SCORE_ANSWER: &str = "score_answer";
/// Operation label for question retrieval.
const OPERATION_NEXT_QUESTION: &str = "next_question";
/// Operation label for finalization.
const OPERATION_FINALIZE: &str = "finalize";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Input shape violations detected before any state work.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// `session` is missing or not a JSON object.
    #[error("session_must_be_object")]
    SessionMustBeObject,
    /// `turn` is missing or not a JSON object.
    #[error("turn_must_be_object")]
    TurnMustBeObject,
}

/// Engine operation errors.
#[derive(Debug, Error, PartialEq)]
pub enum OrchestratorError {
    /// Request shape was invalid.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Scoring adapter failed.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

// ============================================================================
// SECTION: Requests and Results
// ============================================================================

/// Input to [`Orchestrator::score_answer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAnswerRequest {
    /// Session document.
    pub session: Value,
    /// Turn document carrying the answer.
    pub turn: Value,
    /// Advisory remaining interview time.
    #[serde(default)]
    pub time_remaining_sec: Option<f64>,
}

/// Output of [`Orchestrator::score_answer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAnswerResult {
    /// Updated orchestration record.
    pub orchestration: OrchestrationState,
    /// Flags extracted from the answer.
    pub signals: SignalFlags,
    /// Assessment appended for this turn.
    pub assessment: TurnAssessment,
    /// Versioned envelope.
    pub contract: ScoreAnswerContract,
}

/// Input to [`Orchestrator::next_question`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionRequest {
    /// Session document.
    pub session: Value,
    /// Advisory remaining interview time.
    #[serde(default)]
    pub time_remaining_sec: Option<f64>,
}

/// Question chosen by [`Orchestrator::next_question`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedQuestion {
    /// Question identifier.
    pub id: QuestionId,
    /// Prompt text.
    pub text: String,
    /// Competency the question probes.
    pub competency: Competency,
}

/// Output of [`Orchestrator::next_question`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionResult {
    /// Selected question, or `None` once the pool is exhausted.
    pub question: Option<SelectedQuestion>,
    /// Updated orchestration record.
    pub orchestration: OrchestrationState,
    /// Versioned envelope.
    pub contract: NextQuestionContract,
}

/// Input to [`Orchestrator::finalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeRequest {
    /// Session document.
    pub session: Value,
    /// End instant; the engine clock is used when absent.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Interview orchestration engine.
pub struct Orchestrator<A, C, K> {
    /// Immutable configuration snapshot.
    config: OrchestratorConfig,
    /// Answer scoring collaborator.
    scoring: A,
    /// Answer signal classifier.
    signals: C,
    /// Time source.
    clock: K,
    /// Audit sink for per-operation events.
    audit: Arc<dyn OrchestrationAuditSink>,
}

impl<A, C, K> Orchestrator<A, C, K>
where
    A: ScoringAdapter,
    C: SignalClassifier,
    K: Clock,
{
    /// Creates an engine that discards audit events.
    #[must_use]
    pub fn new(config: OrchestratorConfig, scoring: A, signals: C, clock: K) -> Self {
        Self {
            config,
            scoring,
            signals,
            clock,
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn OrchestrationAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the configuration snapshot.
    #[must_use]
    pub const fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Restores the orchestration record carried by a session.
    #[must_use]
    pub fn build(&self, session: &Value) -> OrchestrationState {
        build_state(session, &self.config.versions)
    }

    /// Scores one answer and evaluates the phase policy.
    ///
    /// Not idempotent: every call appends an assessment.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::Input`] when the session or turn is not
    /// an object, and [`OrchestratorError::Scoring`] when the adapter fails
    /// or returns a non-finite score.
    pub fn score_answer(
        &self,
        request: &ScoreAnswerRequest,
    ) -> Result<ScoreAnswerResult, OrchestratorError> {
        let session = require_object(&request.session, InputError::SessionMustBeObject)?;
        let turn = require_object(&request.turn, InputError::TurnMustBeObject)?;
        let time_remaining_sec = normalize_time_remaining(request.time_remaining_sec);

        let state = self.build(&request.session);
        let turn = TurnInput::from_object(turn);
        let questions = session_questions(session);
        let current = questions.get(state.answer_count());
        let question_id = current.map(|question| question.id.clone());
        let competency = self.scoring.infer_competency(current);

        let outcome = self.scoring.score_answer(&ScoreRequest {
            answer_text: turn.text.clone(),
            competency: competency.clone(),
            turn_id: turn.turn_id.clone(),
            question_id: question_id.clone(),
            difficulty: state.difficulty,
        })?;
        if !outcome.score.is_finite() {
            return Err(ScoringError::NonFiniteScore(outcome.score).into());
        }
        let signals = self.signals.classify(&turn.text);

        let evidence_candidate = outcome.evidence_candidate.map(|mut candidate| {
            if candidate.competency.is_none() {
                candidate.competency = Some(competency.clone());
            }
            if candidate.turn_id.is_none() {
                candidate.turn_id.clone_from(&turn.turn_id);
            }
            candidate
        });
        let assessment = TurnAssessment {
            turn_id: turn.turn_id.clone(),
            question_id: question_id.clone(),
            competency: competency.clone(),
            difficulty_before: state.difficulty,
            score: outcome.score,
            difficulty_after: outcome.difficulty_after,
            evidence_candidate: evidence_candidate.clone(),
        };

        let mut next = state.clone();
        next.coverage =
            self.scoring.build_coverage_update(&state.coverage, &competency, outcome.score);
        next.difficulty = outcome.difficulty_after;
        if let Some(candidate) = evidence_candidate.filter(|candidate| candidate.has_quote()) {
            next.push_evidence(candidate);
        }
        next.turn_assessments.push(assessment.clone());
        if let Some(id) = &question_id {
            next.register_asked(id.clone());
            next.last_question_id = Some(id.clone());
        }
        if signals.is_fatigued {
            next.fatigue_signals = next.fatigue_signals.saturating_add(1);
        }
        if signals.is_non_answer {
            next.non_answer_signals = next.non_answer_signals.saturating_add(1);
            next.non_answer_streak = next.non_answer_streak.saturating_add(1);
        } else {
            next.non_answer_streak = 0;
        }
        next.contract_version = CONTRACT_VERSION.to_string();

        let at = self.clock.now();
        let next = apply_phase_transition(
            &next,
            time_remaining_sec,
            TransitionSite::ScoreAnswer,
            &self.config.thresholds,
            at,
        );

        self.record(OPERATION_SCORE_ANSWER, at, state.phase, &next, question_id, Some(signals));

        let contract = ContractEnvelope::new(
            SCORE_ANSWER_CONTRACT,
            ScoreAnswerContractInput {
                time_remaining_sec,
                turn_id: turn.turn_id,
                role: turn.role,
            },
            ScoreAnswerContractOutput {
                phase: next.phase,
                difficulty: next.difficulty,
                coverage_competencies: next.coverage.keys().cloned().collect(),
                last_transition_reason: next.last_transition_reason.clone(),
            },
        );
        Ok(ScoreAnswerResult {
            orchestration: next,
            signals,
            assessment,
            contract,
        })
    }

    /// Evaluates the phase policy and selects the next question.
    ///
    /// The selected question is not marked as asked; only scoring does that.
    /// When no unanswered question remains the phase is forced to `wrap_up`.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::Input`] when the session is not an object.
    pub fn next_question(
        &self,
        request: &NextQuestionRequest,
    ) -> Result<NextQuestionResult, OrchestratorError> {
        let session = require_object(&request.session, InputError::SessionMustBeObject)?;
        let time_remaining_sec = normalize_time_remaining(request.time_remaining_sec);

        let restored = self.build(&request.session);
        let at = self.clock.now();
        let state = apply_phase_transition(
            &restored,
            time_remaining_sec,
            TransitionSite::NextQuestion,
            &self.config.thresholds,
            at,
        );

        let candidates = session_questions(session)
            .into_iter()
            .filter(|question| !state.has_asked(&question.id))
            .map(|question| QuestionCandidate {
                competency: self.scoring.infer_competency(Some(&question)),
                question,
            })
            .collect::<Vec<_>>();

        let Some(selected) = select_question(state.phase, &candidates, &state.coverage) else {
            let mut wrapped =
                force_wrap_up(&state, time_remaining_sec, &self.config.thresholds, at);
            wrapped.contract_version = CONTRACT_VERSION.to_string();
            self.record(OPERATION_NEXT_QUESTION, at, restored.phase, &wrapped, None, None);
            let contract = ContractEnvelope::new(
                NEXT_QUESTION_CONTRACT,
                NextQuestionContractInput {
                    time_remaining_sec,
                    current_phase: None,
                },
                NextQuestionContractOutput {
                    question_id: None,
                    competency: None,
                    phase: wrapped.phase,
                    transition_reason: wrapped.last_transition_reason.clone(),
                },
            );
            return Ok(NextQuestionResult {
                question: None,
                orchestration: wrapped,
                contract,
            });
        };

        let question = SelectedQuestion {
            id: selected.question.id.clone(),
            text: selected.question.text.clone(),
            competency: selected.competency.clone(),
        };
        let mut next = state;
        next.last_question_id = Some(question.id.clone());
        next.contract_version = CONTRACT_VERSION.to_string();
        self.record(
            OPERATION_NEXT_QUESTION,
            at,
            restored.phase,
            &next,
            Some(question.id.clone()),
            None,
        );

        let contract = ContractEnvelope::new(
            NEXT_QUESTION_CONTRACT,
            NextQuestionContractInput {
                time_remaining_sec,
                current_phase: Some(next.phase),
            },
            NextQuestionContractOutput {
                question_id: Some(question.id.clone()),
                competency: Some(question.competency.clone()),
                phase: next.phase,
                transition_reason: next.last_transition_reason.clone(),
            },
        );
        Ok(NextQuestionResult {
            question: Some(question),
            orchestration: next,
            contract,
        })
    }

    /// Ends the interview and computes its duration.
    ///
    /// Always succeeds; non-object sessions finalize a fresh record.
    #[must_use]
    pub fn finalize(&self, request: &FinalizeRequest) -> OrchestrationState {
        let state = self.build(&request.session);
        let ended_at = request.ended_at.unwrap_or_else(|| self.clock.now());
        let started_at = state.started_at.unwrap_or(ended_at);

        let mut next = state.clone();
        next.phase = Phase::WrapUp;
        next.started_at = Some(started_at);
        next.ended_at = Some(ended_at);
        next.duration_sec = Some(elapsed_seconds(started_at, ended_at));

        self.record(OPERATION_FINALIZE, ended_at, state.phase, &next, None, None);
        next
    }

    /// Emits one audit event for an operation.
    fn record(
        &self,
        operation: &'static str,
        at: OffsetDateTime,
        phase_before: Phase,
        state: &OrchestrationState,
        question_id: Option<QuestionId>,
        signals: Option<SignalFlags>,
    ) {
        self.audit.record(&OrchestrationAuditEvent {
            event: ORCHESTRATION_AUDIT_EVENT,
            operation,
            at,
            phase_before,
            phase_after: state.phase,
            phase_changed: phase_before != state.phase,
            transition_reason: state.last_transition_reason.clone(),
            question_id,
            answer_count: state.answer_count(),
            signals,
            contract_version: state.contract_version.clone(),
        });
    }
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Returns the value as an object or the given input error.
fn require_object(value: &Value, error: InputError) -> Result<&Map<String, Value>, InputError> {
    value.as_object().ok_or(error)
}

/// Coerces advisory remaining time to whole non-negative seconds.
///
/// Non-finite values are treated as absent, so no time rule fires.
#[must_use]
pub fn normalize_time_remaining(value: Option<f64>) -> Option<u64> {
    let seconds = value.filter(|seconds| seconds.is_finite())?;
    #[allow(
        clippy::cast_precision_loss,
        reason = "The upper bound is exactly representable as f64."
    )]
    let max = MAX_TIME_REMAINING_SEC as f64;
    let clamped = seconds.round().clamp(0.0, max);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Value is rounded and clamped to a non-negative range below 2^53."
    )]
    let whole = clamped as u64;
    Some(whole)
}
