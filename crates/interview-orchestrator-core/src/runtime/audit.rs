// crates/interview-orchestrator-core/src/runtime/audit.rs
// ============================================================================
// Module: Orchestration Audit Logging
// Description: Structured audit events and sinks for engine operations.
// Purpose: Emit answer-free audit logs without hard dependencies.
// Dependencies: crate::{core, interfaces}, serde, serde_json, time
// ============================================================================

//! ## Overview
//! Each engine operation emits one [`OrchestrationAuditEvent`] as a JSON line.
//! Events carry phase movement, counters, and identifiers only; answer text
//! and question text are never recorded. Deployments route events by choosing
//! a sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use time::OffsetDateTime;

use crate::core::Phase;
use crate::core::QuestionId;
use crate::core::SignalFlags;
use crate::interfaces::OrchestrationAuditSink;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event identifier shared by all orchestration audit events.
pub const ORCHESTRATION_AUDIT_EVENT: &str = "interview_orchestration";

/// Orchestration audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrchestrationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Operation name (`score_answer`, `next_question`, `finalize`).
    pub operation: &'static str,
    /// Event timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    /// Phase before the operation.
    pub phase_before: Phase,
    /// Phase after the operation.
    pub phase_after: Phase,
    /// Whether the phase changed.
    pub phase_changed: bool,
    /// Composite transition reason recorded by the operation.
    pub transition_reason: Option<String>,
    /// Question scored or selected.
    pub question_id: Option<QuestionId>,
    /// Scored answers after the operation.
    pub answer_count: usize,
    /// Signal flags for scored answers.
    pub signals: Option<SignalFlags>,
    /// Contract version stamped on the state.
    pub contract_version: String,
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl OrchestrationAuditSink for StderrAuditSink {
    fn record(&self, event: &OrchestrationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
#[derive(Debug)]
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl OrchestrationAuditSink for FileAuditSink {
    fn record(&self, event: &OrchestrationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl OrchestrationAuditSink for NoopAuditSink {
    fn record(&self, _event: &OrchestrationAuditEvent) {}
}
