//! 1 Hz time base and per-minute aggregation.
//!
//! A modulo-60 counter over `elapsed_secs`.  Every state except 59 simply
//! advances; 59 → 0 is the minute boundary, where the running count is
//! committed as the new CPM and the window restarts:
//!
//! ```text
//!   0 ─▶ 1 ─▶ … ─▶ 58 ─▶ 59 ──(commit current, current := 0)──▶ 0
//! ```
//!
//! The whole transition happens inside the caller's critical section (see
//! [`crate::counts`]), so the pulse ISR either lands before the commit or
//! after the reset.

use log::trace;

use crate::counts::{Counts, COUNTS, SECONDS_PER_MINUTE};

/// What a single 1 Hz tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// An ordinary second inside the window.
    Second,
    /// The window closed; `cpm` pulses were committed.
    MinuteRollover { cpm: u16 },
}

/// Advance the counters by one second.
pub fn advance(counts: &mut Counts) -> TickOutcome {
    let next = counts.elapsed_secs + 1;
    if next < SECONDS_PER_MINUTE {
        counts.elapsed_secs = next;
        return TickOutcome::Second;
    }

    counts.committed = counts.current;
    counts.committed_overflow = counts.pending_overflow;
    counts.current = 0;
    counts.pending_overflow = false;
    counts.elapsed_secs = 0;
    TickOutcome::MinuteRollover {
        cpm: counts.committed,
    }
}

/// Called once per second by the hardware time base.
pub fn second_tick_handler() {
    if let TickOutcome::MinuteRollover { cpm } = COUNTS.second_elapsed() {
        trace!("timebase: minute committed, cpm={}", cpm);
    }
}
