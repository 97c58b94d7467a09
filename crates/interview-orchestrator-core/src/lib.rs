// crates/interview-orchestrator-core/src/lib.rs
// ============================================================================
// Module: Interview Orchestrator Core Library
// Description: Public API surface for the interview orchestration core.
// Purpose: Expose core types, collaborator interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Interview orchestrator core drives an adaptive interview session turn by
//! turn: it restores persisted orchestration state, classifies answers,
//! decides the interview phase, and selects the next question. The engine is a
//! pure state transformer; callers own persistence and re-invoke it with the
//! state it previously returned.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::Clock;
pub use interfaces::OrchestrationAuditSink;
pub use interfaces::ScoreOutcome;
pub use interfaces::ScoreRequest;
pub use interfaces::ScoringAdapter;
pub use interfaces::ScoringError;
pub use interfaces::SignalClassifier;
pub use runtime::FileAuditSink;
pub use runtime::FinalizeRequest;
pub use runtime::FixedClock;
pub use runtime::InputError;
pub use runtime::NextQuestionRequest;
pub use runtime::NextQuestionResult;
pub use runtime::NoopAuditSink;
pub use runtime::OrchestrationAuditEvent;
pub use runtime::Orchestrator;
pub use runtime::OrchestratorError;
pub use runtime::PatternSignalClassifier;
pub use runtime::PhaseDecision;
pub use runtime::ScoreAnswerRequest;
pub use runtime::ScoreAnswerResult;
pub use runtime::SelectedQuestion;
pub use runtime::SignalPatternError;
pub use runtime::StderrAuditSink;
pub use runtime::SystemClock;
pub use runtime::TransitionReason;
pub use runtime::TransitionSite;
