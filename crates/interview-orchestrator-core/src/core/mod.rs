// crates/interview-orchestrator-core/src/core/mod.rs
// ============================================================================
// Module: Interview Orchestrator Core Types
// Description: Orchestration state, phases, contracts, and session views.
// Purpose: Provide stable, serializable types shared by the runtime and callers.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! Core types are the canonical shapes persisted by callers and returned in
//! engine responses. Runtime behavior lives in [`crate::runtime`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod config;
pub mod contract;
pub mod hashing;
pub mod identifiers;
pub mod phase;
pub mod session;
pub mod state;
pub mod timestamps;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::OrchestratorConfig;
pub use config::PhaseThresholds;
pub use config::VersionTags;
pub use contract::CONTRACT_VERSION;
pub use contract::ContractEnvelope;
pub use contract::ContractError;
pub use contract::NextQuestionContract;
pub use contract::NextQuestionContractInput;
pub use contract::NextQuestionContractOutput;
pub use contract::ScoreAnswerContract;
pub use contract::ScoreAnswerContractInput;
pub use contract::ScoreAnswerContractOutput;
pub use hashing::ContentDigest;
pub use hashing::DigestError;
pub use identifiers::Competency;
pub use identifiers::QuestionId;
pub use identifiers::TurnId;
pub use phase::Difficulty;
pub use phase::Phase;
pub use session::SessionQuestion;
pub use session::TurnInput;
pub use session::session_questions;
pub use state::CompetencyCoverage;
pub use state::Coverage;
pub use state::EVIDENCE_CANDIDATES_LIMIT;
pub use state::EvidenceCandidate;
pub use state::OrchestrationState;
pub use state::PHASE_HISTORY_LIMIT;
pub use state::PhaseTransition;
pub use state::SignalFlags;
pub use state::TRANSITION_REASONS_LIMIT;
pub use state::TurnAssessment;
