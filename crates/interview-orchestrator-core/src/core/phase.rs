// crates/interview-orchestrator-core/src/core/phase.rs
// ============================================================================
// Module: Interview Phases
// Description: Ordered interview phases and difficulty tiers.
// Purpose: Give the phase state machine a closed, totally ordered state set.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Phases are ordered `intro < calibration < core < deep_dive < wrap_up`.
//! The derived [`Ord`] follows declaration order and is what the transition
//! policy compares when suppressing regressions. `wrap_up` is terminal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Phase
// ============================================================================

/// Interview phase.
///
/// # Invariants
/// - Variant order is the phase order; do not reorder.
/// - Variants are stable for serialization and contract matching.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Opening turns before any answer has been scored.
    #[default]
    Intro,
    /// Establishing a baseline across the first answers.
    Calibration,
    /// Broadening coverage across competencies.
    Core,
    /// Probing weak competencies once coverage and scores allow it.
    DeepDive,
    /// Closing the interview; absorbing.
    WrapUp,
}

impl Phase {
    /// All phases in order.
    pub const ALL: [Self; 5] =
        [Self::Intro, Self::Calibration, Self::Core, Self::DeepDive, Self::WrapUp];

    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Calibration => "calibration",
            Self::Core => "core",
            Self::DeepDive => "deep_dive",
            Self::WrapUp => "wrap_up",
        }
    }

    /// Parses a wire label; unknown labels yield `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.as_str() == label)
    }

    /// Returns true for the terminal phase.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::WrapUp)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Difficulty
// ============================================================================

/// Question difficulty tier tracked across turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Easier follow-ups.
    Easy,
    /// Starting tier.
    #[default]
    Medium,
    /// Harder follow-ups.
    Hard,
}

impl Difficulty {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parses a wire label; unknown labels yield `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
