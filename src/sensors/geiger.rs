//! Geiger–Müller tube pulse counter.
//!
//! Each particle strike produces a short negative-going pulse on the tube
//! cathode line.  The GPIO ISR calls [`pulse_isr_handler`] on every falling
//! edge; the handler only bumps the shared counter (and flips the red debug
//! LED), it never formats, logs or blocks, because it preempts both the
//! reporting loop and the software UART bit handler.

use crate::counts::{Counts, COUNTS};
use crate::drivers::debug_led::{self, Led};

/// Count one pulse.  Wraps at 65535 → 0; the wrap is latched in
/// `pending_overflow` so the reporting side can flag the affected minute.
pub fn count_pulse(counts: &mut Counts) {
    let (next, wrapped) = counts.current.overflowing_add(1);
    counts.current = next;
    counts.pending_overflow |= wrapped;
}

/// Called from the GPIO ISR on each tube edge.
pub fn pulse_isr_handler() {
    COUNTS.record_pulse();
    debug_led::toggle(Led::Red);
}
