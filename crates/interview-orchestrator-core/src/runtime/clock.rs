// crates/interview-orchestrator-core/src/runtime/clock.rs
// ============================================================================
// Module: Clocks
// Description: Wall-clock and fixed time sources.
// Purpose: Keep time reads explicit and replaceable in tests.
// Dependencies: crate::interfaces, time
// ============================================================================

//! ## Overview
//! Wall-clock and fixed time sources. The engine reads time only through
//! [`Clock`], so tests pin every timestamp with [`FixedClock`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

use crate::interfaces::Clock;

// ============================================================================
// SECTION: Clocks
// ============================================================================

/// Clock backed by the system's UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(
    /// Instant reported by every call.
    pub OffsetDateTime,
);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
