// crates/interview-orchestrator-core/src/core/config.rs
// ============================================================================
// Module: Orchestrator Configuration Snapshot
// Description: Phase thresholds and version tags consumed by the engine.
// Purpose: Carry one immutable configuration value into every engine call.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The engine never reads the environment. Hosts build an
//! [`OrchestratorConfig`] once (see the `interview-orchestrator-config` crate
//! for file and environment loading) and hand it to the engine, which keeps it
//! for its lifetime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::contract::CONTRACT_VERSION;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default remaining-time threshold (seconds) that triggers wrap-up.
pub const DEFAULT_LOW_TIME_SEC: u64 = 120;
/// Default remaining-time threshold (seconds) considered critical.
pub const DEFAULT_CRITICAL_TIME_SEC: u64 = 45;
/// Default answers required before leaving calibration.
pub const DEFAULT_CALIBRATION_MIN_ANSWERS: u32 = 2;
/// Default answered competencies required for the core phase.
pub const DEFAULT_CORE_MIN_COMPETENCIES: u32 = 2;
/// Default answered competencies required for the deep-dive phase.
pub const DEFAULT_DEEP_DIVE_MIN_COMPETENCIES: u32 = 3;
/// Default mean score across answered competencies required for deep-dive.
pub const DEFAULT_DEEP_DIVE_MIN_AVERAGE: f64 = 3.0;
/// Default fatigue signal count that forces wrap-up.
pub const DEFAULT_WRAP_UP_FATIGUE_SIGNALS: u32 = 2;
/// Default consecutive non-answer count that forces wrap-up.
pub const DEFAULT_WRAP_UP_NON_ANSWER_STREAK: u32 = 2;
/// Default prompt version tag.
pub const DEFAULT_PROMPT_VERSION: &str = "voice-prompt-v1";
/// Default rubric version tag.
pub const DEFAULT_RUBRIC_VERSION: &str = "rubric-v1";
/// Default scoring version tag.
pub const DEFAULT_SCORING_VERSION: &str = "scoring-v1";

// ============================================================================
// SECTION: Phase Thresholds
// ============================================================================

/// Thresholds evaluated by the phase transition policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseThresholds {
    /// Remaining seconds at or below which the interview wraps up.
    pub low_time_sec: u64,
    /// Remaining seconds at or below which time is critical.
    pub critical_time_sec: u64,
    /// Answers required before leaving calibration.
    pub calibration_min_answers: u32,
    /// Answered competencies required for the core phase.
    pub core_min_competencies: u32,
    /// Answered competencies required for deep-dive.
    pub deep_dive_min_competencies: u32,
    /// Mean score across answered competencies required for deep-dive.
    pub deep_dive_min_average: f64,
    /// Fatigue signals that force wrap-up.
    pub wrap_up_fatigue_signals: u32,
    /// Consecutive non-answers that force wrap-up.
    pub wrap_up_non_answer_streak: u32,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            low_time_sec: DEFAULT_LOW_TIME_SEC,
            critical_time_sec: DEFAULT_CRITICAL_TIME_SEC,
            calibration_min_answers: DEFAULT_CALIBRATION_MIN_ANSWERS,
            core_min_competencies: DEFAULT_CORE_MIN_COMPETENCIES,
            deep_dive_min_competencies: DEFAULT_DEEP_DIVE_MIN_COMPETENCIES,
            deep_dive_min_average: DEFAULT_DEEP_DIVE_MIN_AVERAGE,
            wrap_up_fatigue_signals: DEFAULT_WRAP_UP_FATIGUE_SIGNALS,
            wrap_up_non_answer_streak: DEFAULT_WRAP_UP_NON_ANSWER_STREAK,
        }
    }
}

// ============================================================================
// SECTION: Version Tags
// ============================================================================

/// Version tags stamped onto freshly built orchestration state.
///
/// # Invariants
/// - Tags are only used as defaults; persisted tags are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionTags {
    /// Prompt version tag.
    pub prompt_version: String,
    /// Rubric version tag.
    pub rubric_version: String,
    /// Scoring version tag.
    pub scoring_version: String,
    /// Contract version tag.
    pub contract_version: String,
}

impl Default for VersionTags {
    fn default() -> Self {
        Self {
            prompt_version: DEFAULT_PROMPT_VERSION.to_string(),
            rubric_version: DEFAULT_RUBRIC_VERSION.to_string(),
            scoring_version: DEFAULT_SCORING_VERSION.to_string(),
            contract_version: CONTRACT_VERSION.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Orchestrator Config
// ============================================================================

/// Immutable configuration snapshot for the orchestration engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Phase transition thresholds.
    pub thresholds: PhaseThresholds,
    /// Default version tags.
    pub versions: VersionTags,
}
