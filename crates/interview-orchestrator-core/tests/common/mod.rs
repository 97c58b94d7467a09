// crates/interview-orchestrator-core/tests/common/mod.rs
// ============================================================================
// Module: Shared Test Fixtures
// Description: Stub collaborators and session builders for integration tests.
// ============================================================================

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Shared fixtures are used by a subset of test crates."
)]

use interview_orchestrator_core::Difficulty;
use interview_orchestrator_core::EvidenceCandidate;
use interview_orchestrator_core::FixedClock;
use interview_orchestrator_core::Orchestrator;
use interview_orchestrator_core::OrchestratorConfig;
use interview_orchestrator_core::PatternSignalClassifier;
use interview_orchestrator_core::ScoreOutcome;
use interview_orchestrator_core::ScoreRequest;
use interview_orchestrator_core::ScoringAdapter;
use interview_orchestrator_core::ScoringError;
use interview_orchestrator_core::SignalClassifier;
use interview_orchestrator_core::SignalFlags;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;

/// Fixed instant used by test clocks (2026-01-01T00:00:00Z).
pub fn fixed_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_767_225_600).unwrap()
}

/// Scoring adapter returning a fixed outcome for every answer.
#[derive(Debug, Clone)]
pub struct StubScoring {
    /// Score returned for every answer.
    pub score: f64,
    /// Difficulty returned for every answer.
    pub difficulty_after: Difficulty,
    /// Evidence quote returned for every answer.
    pub quote: Option<String>,
}

impl StubScoring {
    /// Returns a stub that scores every answer with `score`.
    pub fn scoring(score: f64) -> Self {
        Self {
            score,
            difficulty_after: Difficulty::Medium,
            quote: None,
        }
    }
}

impl ScoringAdapter for StubScoring {
    fn score_answer(&self, _request: &ScoreRequest) -> Result<ScoreOutcome, ScoringError> {
        Ok(ScoreOutcome {
            score: self.score,
            difficulty_after: self.difficulty_after,
            evidence_candidate: self.quote.as_ref().map(|quote| EvidenceCandidate {
                quote: quote.clone(),
                competency: None,
                turn_id: None,
            }),
        })
    }
}

/// Scoring adapter that always fails.
#[derive(Debug, Clone, Copy)]
pub struct FailingScoring;

impl ScoringAdapter for FailingScoring {
    fn score_answer(&self, _request: &ScoreRequest) -> Result<ScoreOutcome, ScoringError> {
        Err(ScoringError::Adapter("model unavailable".to_string()))
    }
}

/// Signal classifier returning fixed flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubSignals(pub SignalFlags);

impl SignalClassifier for StubSignals {
    fn classify(&self, _answer_text: &str) -> SignalFlags {
        self.0
    }
}

/// Engine with the pattern classifier, default config, and a fixed clock.
pub fn engine(
    scoring: StubScoring,
) -> Orchestrator<StubScoring, PatternSignalClassifier, FixedClock> {
    Orchestrator::new(
        OrchestratorConfig::default(),
        scoring,
        PatternSignalClassifier::new().unwrap(),
        FixedClock(fixed_now()),
    )
}

/// Question document with an explicit id and competency.
pub fn question(id: &str, competency: &str) -> Value {
    json!({ "id": id, "text": format!("Question {id}"), "competency": competency })
}

/// Session document with the given questions and optional orchestration.
pub fn session(questions: &[Value], orchestration: Option<Value>) -> Value {
    let mut session = json!({ "aiInterviewQuestions": questions });
    if let Some(orchestration) = orchestration {
        session["orchestration"] = orchestration;
    }
    session
}

/// Replaces the session's orchestration record.
pub fn with_orchestration(session: &Value, orchestration: &impl serde::Serialize) -> Value {
    let mut next = session.clone();
    next["orchestration"] = serde_json::to_value(orchestration).unwrap();
    next
}

/// Turn document carrying answer text.
pub fn turn(text: &str) -> Value {
    json!({ "turnId": "t-1", "text": text })
}

/// Substantive answer that triggers no signal.
pub const REAL_ANSWER: &str = "I would partition the table by tenant and add a covering index.";
