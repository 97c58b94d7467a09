// crates/interview-orchestrator-config/src/lib.rs
// ============================================================================
// Module: Interview Orchestrator Config Library
// Description: Canonical config model, environment overrides, and validation.
// Purpose: Single source of truth for interview-orchestrator.toml semantics.
// Dependencies: interview-orchestrator-core, serde, toml
// ============================================================================

//! ## Overview
//! `interview-orchestrator-config` loads the engine's configuration snapshot
//! from a TOML file, from `PUBLIC_AI_*` environment variables, or both, and
//! validates it fail-closed before handing an
//! [`interview_orchestrator_core::OrchestratorConfig`] to the engine.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
