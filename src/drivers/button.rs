//! Debug push-button.
//!
//! The GPIO ISR fires on the falling edge; the handler flips the green LED
//! and bumps an atomic press counter.  The main loop polls a
//! [`ButtonMonitor`] to log presses without doing any work in the ISR.
//! No debounce: a bouncy switch simply counts (and toggles) more than once.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::drivers::debug_led::{self, Led};

/// Raw edge count, written by the ISR, read by the main loop.
static BUTTON_PRESSES: AtomicU32 = AtomicU32::new(0);

/// ISR handler, registered on the button GPIO falling edge.
pub fn button_isr_handler() {
    BUTTON_PRESSES.fetch_add(1, Ordering::Release);
    debug_led::toggle(Led::Green);
}

/// Presses since boot.
pub fn press_count() -> u32 {
    BUTTON_PRESSES.load(Ordering::Acquire)
}

/// Main-loop side: reports how many presses arrived since the last poll.
#[derive(Debug, Default)]
pub struct ButtonMonitor {
    seen: u32,
}

impl ButtonMonitor {
    pub fn new() -> Self {
        Self {
            seen: press_count(),
        }
    }

    /// New presses since the previous call, if any.
    pub fn poll(&mut self) -> Option<u32> {
        self.observe(press_count())
    }

    fn observe(&mut self, total: u32) -> Option<u32> {
        let fresh = total.wrapping_sub(self.seen);
        self.seen = total;
        (fresh > 0).then_some(fresh)
    }
}
