// crates/interview-orchestrator-core/src/core/identifiers.rs
// ============================================================================
// Module: Interview Orchestrator Identifiers
// Description: Opaque identifiers for questions, turns, and competencies.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque strings owned by the caller's session documents.
//! They serialize transparently so persisted records keep their original
//! shape. Derivation rules (for example the ordinal fallback for question ids)
//! live at the session boundary, not in these wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Question identifier derived from the session question list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new question identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the fallback identifier for a question at a zero-based ordinal.
    #[must_use]
    pub fn from_ordinal(ordinal: usize) -> Self {
        Self(format!("q{}", ordinal + 1))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Turn identifier supplied by the transcript producer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(String);

impl TurnId {
    /// Creates a new turn identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TurnId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TurnId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Competency name used as the unit of coverage tracking.
///
/// # Invariants
/// - Ordered lexically so coverage maps iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Competency(String);

impl Competency {
    /// Competency assigned when a question carries no usable hint.
    pub const GENERAL: &'static str = "general";

    /// Creates a new competency name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the fallback competency.
    #[must_use]
    pub fn general() -> Self {
        Self::new(Self::GENERAL)
    }

    /// Returns the competency as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Competency {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Competency {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
