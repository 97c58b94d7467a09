// crates/interview-orchestrator-core/src/runtime/builder.rs
// ============================================================================
// Module: Orchestration State Builder
// Description: Restores persisted orchestration records into normalized state.
// Purpose: Make every engine call usable from partial or corrupted records.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! Persisted records are untrusted: they may be absent, written by an older
//! release, or hand-edited. Restoration never fails. Each field is decoded on
//! its own and replaced by its default when missing or mistyped, so one bad
//! field never discards its neighbours. Building from an already-normalized
//! record yields an equal record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::Competency;
use crate::core::CompetencyCoverage;
use crate::core::Coverage;
use crate::core::Difficulty;
use crate::core::EVIDENCE_CANDIDATES_LIMIT;
use crate::core::EvidenceCandidate;
use crate::core::OrchestrationState;
use crate::core::PHASE_HISTORY_LIMIT;
use crate::core::Phase;
use crate::core::PhaseTransition;
use crate::core::QuestionId;
use crate::core::TRANSITION_REASONS_LIMIT;
use crate::core::TurnAssessment;
use crate::core::TurnId;
use crate::core::VersionTags;
use crate::core::session::ORCHESTRATION_FIELD;
use crate::core::state::truncate_oldest;
use crate::core::timestamps::decode_timestamp;

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Restores the orchestration state carried by a session document.
///
/// `session` may be any JSON value; non-objects and sessions without an
/// `orchestration` object produce a fresh state stamped with `versions`.
#[must_use]
pub fn build_state(session: &Value, versions: &VersionTags) -> OrchestrationState {
    let empty = Map::new();
    let session = session.as_object().unwrap_or(&empty);
    let record = session.get(ORCHESTRATION_FIELD).and_then(Value::as_object).unwrap_or(&empty);
    let fresh = OrchestrationState::fresh(versions);

    let mut phase_history = array(record, "phaseHistory")
        .filter_map(|entry| serde_json::from_value::<PhaseTransition>(entry.clone()).ok())
        .collect::<Vec<_>>();
    truncate_oldest(&mut phase_history, PHASE_HISTORY_LIMIT);

    let mut transition_reasons = array(record, "transitionReasons")
        .filter_map(non_empty_str)
        .map(str::to_string)
        .collect::<Vec<_>>();
    truncate_oldest(&mut transition_reasons, TRANSITION_REASONS_LIMIT);

    let mut evidence_candidates = array(record, "evidenceCandidates")
        .filter_map(restore_evidence)
        .collect::<Vec<_>>();
    truncate_oldest(&mut evidence_candidates, EVIDENCE_CANDIDATES_LIMIT);

    let mut asked_question_ids = Vec::new();
    for id in array(record, "askedQuestionIds").filter_map(non_empty_str) {
        let id = QuestionId::from(id);
        if !asked_question_ids.contains(&id) {
            asked_question_ids.push(id);
        }
    }

    let voice_started_at = || {
        session.get("voice").and_then(|voice| voice.get("startedAt")).and_then(decode_timestamp)
    };
    let started_at = record
        .get("startedAt")
        .and_then(decode_timestamp)
        .or_else(voice_started_at)
        .or_else(|| session.get("startedAt").and_then(decode_timestamp));

    OrchestrationState {
        phase: str_field(record, "phase").and_then(Phase::parse).unwrap_or(fresh.phase),
        phase_history,
        transition_reasons,
        started_at,
        ended_at: record.get("endedAt").and_then(decode_timestamp),
        duration_sec: record.get("durationSec").and_then(as_whole_number),
        prompt_version: version(record, "promptVersion", &fresh.prompt_version),
        rubric_version: version(record, "rubricVersion", &fresh.rubric_version),
        scoring_version: version(record, "scoringVersion", &fresh.scoring_version),
        contract_version: version(record, "contractVersion", &fresh.contract_version),
        coverage: record
            .get("coverage")
            .and_then(Value::as_object)
            .map(restore_coverage)
            .unwrap_or_default(),
        difficulty: str_field(record, "difficulty")
            .and_then(Difficulty::parse)
            .unwrap_or(fresh.difficulty),
        evidence_candidates,
        turn_assessments: array(record, "turnAssessments").map(restore_assessment).collect(),
        asked_question_ids,
        last_question_id: str_field(record, "lastQuestionId").map(QuestionId::from),
        fatigue_signals: count(record, "fatigueSignals"),
        non_answer_signals: count(record, "nonAnswerSignals"),
        non_answer_streak: count(record, "nonAnswerStreak"),
        last_transition_reason: str_field(record, "lastTransitionReason").map(str::to_string),
        last_transition_at: record.get("lastTransitionAt").and_then(decode_timestamp),
    }
}

// ============================================================================
// SECTION: Nested Records
// ============================================================================

/// Restores coverage entries; non-object entries are dropped.
fn restore_coverage(map: &Map<String, Value>) -> Coverage {
    map.iter()
        .filter_map(|(name, entry)| {
            let entry = entry.as_object()?;
            let answer_count = entry
                .get("answerCount")
                .and_then(as_whole_number)
                .and_then(|value| u32::try_from(value).ok())
                .unwrap_or(0);
            let average_score = entry
                .get("averageScore")
                .and_then(Value::as_f64)
                .filter(|value| value.is_finite())
                .unwrap_or(0.0);
            Some((Competency::new(name.clone()), CompetencyCoverage {
                answer_count,
                average_score,
            }))
        })
        .collect()
}

/// Restores an entry of the `evidenceCandidates` log; blank quotes are dropped.
fn restore_evidence(entry: &Value) -> Option<EvidenceCandidate> {
    decode_evidence(entry).filter(EvidenceCandidate::has_quote)
}

/// Decodes an evidence candidate from an object or a bare quote string.
///
/// Strings are taken verbatim, including empty ones, so candidates attached
/// to assessments restore exactly as the engine wrote them.
fn decode_evidence(entry: &Value) -> Option<EvidenceCandidate> {
    match entry {
        Value::String(quote) => Some(EvidenceCandidate {
            quote: quote.clone(),
            competency: None,
            turn_id: None,
        }),
        Value::Object(map) => Some(EvidenceCandidate {
            quote: map.get("quote").and_then(Value::as_str)?.to_string(),
            competency: map.get("competency").and_then(Value::as_str).map(Competency::from),
            turn_id: map.get("turnId").and_then(Value::as_str).map(TurnId::from),
        }),
        _ => None,
    }
}

/// Restores one turn assessment.
///
/// Every entry maps to exactly one assessment because the number of
/// assessments is the number of answers already processed.
fn restore_assessment(entry: &Value) -> TurnAssessment {
    let empty = Map::new();
    let map = entry.as_object().unwrap_or(&empty);
    TurnAssessment {
        turn_id: str_field(map, "turnId").map(TurnId::from),
        question_id: str_field(map, "questionId").map(QuestionId::from),
        competency: str_field(map, "competency").map_or_else(Competency::general, Competency::from),
        difficulty_before: str_field(map, "difficultyBefore")
            .and_then(Difficulty::parse)
            .unwrap_or_default(),
        score: map.get("score").and_then(Value::as_f64).filter(|s| s.is_finite()).unwrap_or(0.0),
        difficulty_after: str_field(map, "difficultyAfter")
            .and_then(Difficulty::parse)
            .unwrap_or_default(),
        evidence_candidate: map.get("evidenceCandidate").and_then(decode_evidence),
    }
}

// ============================================================================
// SECTION: Field Helpers
// ============================================================================

/// Iterates an array field; missing or non-array fields are empty.
fn array<'a>(map: &'a Map<String, Value>, field: &str) -> impl Iterator<Item = &'a Value> {
    map.get(field).and_then(Value::as_array).into_iter().flatten()
}

/// Returns a non-empty string field.
fn str_field<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    map.get(field).and_then(non_empty_str)
}

/// Returns the value as a non-empty string.
fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|text| !text.is_empty())
}

/// Returns a version tag field or its default.
fn version(map: &Map<String, Value>, field: &str, default: &str) -> String {
    str_field(map, field).unwrap_or(default).to_string()
}

/// Returns a counter field, or zero when missing or malformed.
fn count(map: &Map<String, Value>, field: &str) -> u32 {
    map.get(field)
        .and_then(as_whole_number)
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(0)
}

/// Largest float accepted as a whole number (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Decodes a non-negative whole number stored as an integer or integral float.
fn as_whole_number(value: &Value) -> Option<u64> {
    if let Some(number) = value.as_u64() {
        return Some(number);
    }
    let float = value.as_f64()?;
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= MAX_EXACT_FLOAT {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Value is a non-negative integral float within the exact range."
        )]
        let whole = float as u64;
        Some(whole)
    } else {
        None
    }
}
