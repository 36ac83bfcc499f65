//! Port traits between the reporting loop and the outside world.
//!
//! ```text
//!   COUNTS (ISR-shared) ──▶ CountSource ──▶ ReportingLoop ──▶ SerialSink ──▶ TX_LINE
//!                                                 │
//!                                                 └──────────▶ EventSink ──▶ log
//! ```

use crate::counts::Counts;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Count source (interrupt-shared state → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port over the pulse and time-base counters.
pub trait CountSource {
    /// One consistent view of every counter.  Implementations must not let
    /// an interrupt update land halfway through the read.
    fn snapshot(&self) -> Counts;
}

// ───────────────────────────────────────────────────────────────
// Serial sink (domain → report line)
// ───────────────────────────────────────────────────────────────

/// Byte-at-a-time transmitter.  `&self` because the line is shared with
/// the interrupt that clocks it out.
pub trait SerialSink {
    /// Send one byte.  May block until the line can accept it.
    fn transmit(&self, byte: u8);

    /// Send `bytes` in order.
    fn print(&self, bytes: &[u8]) {
        for &b in bytes {
            self.transmit(b);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The loop emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
