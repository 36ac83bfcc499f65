//! Counter state shared by the pulse ISR, the 1 Hz time base and the
//! reporting loop.
//!
//! ```text
//! ┌─────────────┐ increment ┌──────────────────────┐  snapshot  ┌────────────┐
//! │ GM pulse ISR│──────────▶│      SharedCounts     │──────────▶│ Reporting  │
//! └─────────────┘           │ current · committed · │           │   loop     │
//! ┌─────────────┐ tick /    │ elapsed · overflow    │           └────────────┘
//! │ 1 Hz timer  │──────────▶│ (critical_section)    │
//! └─────────────┘ rollover  └──────────────────────┘
//! ```
//!
//! ## Atomicity contract
//!
//! All fields form one group behind a single `critical_section::Mutex`.
//! Every access (pulse increment, second tick, minute rollover, snapshot)
//! runs inside one critical section, so:
//!
//! - the rollover `committed := current; current := 0; elapsed := 0` is
//!   never observed half-done by the pulse handler or the reporting loop;
//! - a pulse is counted either before the snapshot (ends up in
//!   `committed`) or after it (ends up in the fresh `current`), never both
//!   and never neither.
//!
//! The critical section is held for a handful of instructions only, which
//! keeps the bit-timer jitter of the software UART well below one tick.

use core::cell::Cell;

use critical_section::Mutex;

use crate::app::ports::CountSource;

/// Length of one counting window.
pub const SECONDS_PER_MINUTE: u8 = 60;

/// Plain-data view of the shared counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    /// Pulses since the last minute boundary.
    pub current: u16,
    /// CPM frozen at the most recent minute boundary.
    pub committed: u16,
    /// Seconds since the last minute boundary, always `< 60`.
    pub elapsed_secs: u8,
    /// `current` wrapped past 65535 during the running minute.
    pub pending_overflow: bool,
    /// `committed` was taken from a minute in which the counter wrapped.
    pub committed_overflow: bool,
}

impl Counts {
    pub const fn new() -> Self {
        Self {
            current: 0,
            committed: 0,
            elapsed_secs: 0,
            pending_overflow: false,
            committed_overflow: false,
        }
    }
}

/// Interrupt-safe container for [`Counts`].
pub struct SharedCounts {
    inner: Mutex<Cell<Counts>>,
}

impl SharedCounts {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(Counts::new())),
        }
    }

    /// Run `f` on the counters inside one critical section.
    pub fn update<R>(&self, f: impl FnOnce(&mut Counts) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut counts = cell.get();
            let result = f(&mut counts);
            cell.set(counts);
            result
        })
    }

    /// Consistent copy of all counters.
    pub fn snapshot(&self) -> Counts {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    /// Pulse Counter entry point; see [`crate::sensors::geiger`].
    pub fn record_pulse(&self) {
        self.update(crate::sensors::geiger::count_pulse);
    }

    /// Time-Base Aggregator entry point; see [`crate::timebase`].
    pub fn second_elapsed(&self) -> crate::timebase::TickOutcome {
        self.update(crate::timebase::advance)
    }
}

impl Default for SharedCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl CountSource for SharedCounts {
    fn snapshot(&self) -> Counts {
        SharedCounts::snapshot(self)
    }
}

/// The device-wide counters, written from interrupt context.
pub static COUNTS: SharedCounts = SharedCounts::new();
