// crates/interview-orchestrator-core/src/runtime/mod.rs
// ============================================================================
// Module: Interview Orchestrator Runtime
// Description: State restoration, signal extraction, policy, and the engine.
// Purpose: Implement orchestration behavior on top of the core types.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime is layered bottom-up: [`builder`] restores state, [`signals`]
//! classifies answers, [`policy`] decides phases, [`selector`] picks
//! questions, and [`engine`] composes them into the public operations.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod builder;
pub mod clock;
pub mod engine;
pub mod policy;
pub mod selector;
pub mod signals;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::OrchestrationAuditEvent;
pub use audit::StderrAuditSink;
pub use builder::build_state;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use engine::FinalizeRequest;
pub use engine::InputError;
pub use engine::NextQuestionRequest;
pub use engine::NextQuestionResult;
pub use engine::Orchestrator;
pub use engine::OrchestratorError;
pub use engine::ScoreAnswerRequest;
pub use engine::ScoreAnswerResult;
pub use engine::SelectedQuestion;
pub use engine::normalize_time_remaining;
pub use policy::CoverageSummary;
pub use policy::PhaseDecision;
pub use policy::TransitionReason;
pub use policy::TransitionSite;
pub use policy::apply_phase_transition;
pub use policy::coverage_summary;
pub use policy::decide_target_phase;
pub use policy::force_wrap_up;
pub use selector::QuestionCandidate;
pub use selector::select_question;
pub use signals::PatternSignalClassifier;
pub use signals::SignalPatternError;
