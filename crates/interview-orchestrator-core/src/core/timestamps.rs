// crates/interview-orchestrator-core/src/core/timestamps.rs
// ============================================================================
// Module: Session Timestamps
// Description: Timestamp decoding and duration arithmetic for session records.
// Purpose: Keep timestamp handling explicit and replayable.
// Dependencies: serde_json, time
// ============================================================================

//! ## Overview
//! The core never reads wall-clock time directly; hosts supply a
//! [`crate::interfaces::Clock`]. Persisted timestamps arrive from document
//! stores in several shapes, so decoding is lenient: anything unreadable is
//! treated as absent rather than rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes a persisted timestamp.
///
/// Accepts RFC 3339 strings, extended-JSON `{"$date": ...}` wrappers, and
/// integer unix milliseconds. Returns `None` for anything else.
#[must_use]
pub fn decode_timestamp(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::String(text) => OffsetDateTime::parse(text.trim(), &Rfc3339).ok(),
        Value::Number(number) => {
            let millis = number.as_i64()?;
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
        }
        Value::Object(map) => map.get("$date").and_then(decode_timestamp),
        _ => None,
    }
}

// ============================================================================
// SECTION: Durations
// ============================================================================

/// Returns elapsed whole seconds between two instants, rounded half-up and
/// clamped at zero.
#[must_use]
pub fn elapsed_seconds(started_at: OffsetDateTime, ended_at: OffsetDateTime) -> u64 {
    let millis = (ended_at - started_at).whole_milliseconds();
    if millis <= 0 {
        return 0;
    }
    u64::try_from((millis + 500) / 1_000).unwrap_or(u64::MAX)
}
