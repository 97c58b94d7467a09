//! Audit sink tests for interview-orchestrator-core.
// crates/interview-orchestrator-core/tests/audit.rs
// ============================================================================
// Module: Orchestration Audit Tests
// Description: JSON-line audit events emitted by engine operations.
// Purpose: Ensure every operation is recorded without answer or question text.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;
use std::sync::Mutex;

use common::StubScoring;
use interview_orchestrator_core::FileAuditSink;
use interview_orchestrator_core::FinalizeRequest;
use interview_orchestrator_core::NextQuestionRequest;
use interview_orchestrator_core::OrchestrationAuditEvent;
use interview_orchestrator_core::OrchestrationAuditSink;
use interview_orchestrator_core::Phase;
use interview_orchestrator_core::ScoreAnswerRequest;
use serde_json::Value;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Sink that keeps events in memory.
#[derive(Default)]
struct RecordingSink {
    /// Recorded events.
    events: Mutex<Vec<OrchestrationAuditEvent>>,
}

impl OrchestrationAuditSink for RecordingSink {
    fn record(&self, event: &OrchestrationAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[test]
fn file_sink_records_one_line_per_operation() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("orchestration-audit.jsonl");
    let engine = common::engine(StubScoring::scoring(4.0))
        .with_audit_sink(Arc::new(FileAuditSink::new(&path)?));

    let session = common::session(&[common::question("q1", "sql")], None);
    let next = engine.next_question(&NextQuestionRequest {
        session: session.clone(),
        time_remaining_sec: Some(600.0),
    })?;
    let session = common::with_orchestration(&session, &next.orchestration);
    let scored = engine.score_answer(&ScoreAnswerRequest {
        session: session.clone(),
        turn: common::turn(common::REAL_ANSWER),
        time_remaining_sec: Some(500.0),
    })?;
    let session = common::with_orchestration(&session, &scored.orchestration);
    let _ = engine.finalize(&FinalizeRequest {
        session,
        ended_at: None,
    });

    let contents = std::fs::read_to_string(&path)?;
    assert!(!contents.contains(common::REAL_ANSWER));
    assert!(!contents.contains("Question q1"));

    let lines: Vec<Value> =
        contents.lines().map(serde_json::from_str).collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 3);
    let operations: Vec<&str> =
        lines.iter().map(|line| line["operation"].as_str().unwrap()).collect();
    assert_eq!(operations, vec!["next_question", "score_answer", "finalize"]);
    for line in &lines {
        assert_eq!(line["event"], "interview_orchestration");
        assert_eq!(line["contract_version"], "orchestration-contract-v2");
    }

    assert_eq!(lines[0]["phase_before"], "intro");
    assert_eq!(lines[0]["question_id"], "q1");
    assert_eq!(lines[0]["signals"], Value::Null);

    assert_eq!(lines[1]["phase_after"], "calibration");
    assert_eq!(lines[1]["phase_changed"], true);
    assert_eq!(lines[1]["answer_count"], 1);
    assert_eq!(lines[1]["signals"]["isNonAnswer"], false);
    assert_eq!(lines[1]["at"], "2026-01-01T00:00:00Z");

    assert_eq!(lines[2]["phase_before"], "calibration");
    assert_eq!(lines[2]["phase_after"], "wrap_up");
    Ok(())
}

#[test]
fn file_sink_appends_to_existing_log() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("audit.jsonl");
    std::fs::write(&path, "{\"existing\":true}\n")?;
    let engine = common::engine(StubScoring::scoring(3.0))
        .with_audit_sink(Arc::new(FileAuditSink::new(&path)?));
    let _ = engine.finalize(&FinalizeRequest {
        session: common::session(&[], None),
        ended_at: None,
    });
    let contents = std::fs::read_to_string(&path)?;
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.starts_with("{\"existing\":true}"));
    Ok(())
}

#[test]
fn exhausted_pool_event_reports_forced_wrap_up() -> TestResult {
    let sink = Arc::new(RecordingSink::default());
    let engine = common::engine(StubScoring::scoring(3.0)).with_audit_sink(sink.clone());
    let _ = engine.next_question(&NextQuestionRequest {
        session: common::session(&[], None),
        time_remaining_sec: None,
    })?;
    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.operation, "next_question");
    assert_eq!(event.phase_before, Phase::Intro);
    assert_eq!(event.phase_after, Phase::WrapUp);
    assert!(event.phase_changed);
    assert_eq!(event.question_id, None);
    assert_eq!(
        event.transition_reason.as_deref(),
        Some("opening_turns:no_questions_remaining")
    );
    Ok(())
}

#[test]
fn rejected_requests_emit_no_events() {
    let sink = Arc::new(RecordingSink::default());
    let engine = common::engine(StubScoring::scoring(3.0)).with_audit_sink(sink.clone());
    let result = engine.score_answer(&ScoreAnswerRequest {
        session: Value::Null,
        turn: common::turn(common::REAL_ANSWER),
        time_remaining_sec: None,
    });
    assert!(result.is_err());
    assert!(sink.events.lock().unwrap().is_empty());
}
