//! Red/green debug LEDs.
//!
//! Red flips on every tube pulse, green is lit at boot and flips on every
//! debug-button press.  Both are driven from ISR context, so the current
//! level lives in an atomic and the GPIO write is a single register poke.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LED GPIOs via hw_init.
//! On host/test: tracks state in the atomics only.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::drivers::hw_init;
use crate::pins;

static ENABLED: AtomicBool = AtomicBool::new(true);
static RED_ON: AtomicBool = AtomicBool::new(false);
static GREEN_ON: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    Red,
    Green,
}

impl Led {
    pub const fn gpio(self) -> i32 {
        match self {
            Self::Red => pins::RED_LED_GPIO,
            Self::Green => pins::GREEN_LED_GPIO,
        }
    }

    fn level(self) -> &'static AtomicBool {
        match self {
            Self::Red => &RED_ON,
            Self::Green => &GREEN_ON,
        }
    }
}

/// Enable or suppress ISR-driven toggling (see `GeigerConfig::debug_leds`).
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn set(led: Led, on: bool) {
    led.level().store(on, Ordering::Relaxed);
    hw_init::gpio_write(led.gpio(), on);
}

/// Flip `led`.  Safe to call from interrupt context.
pub fn toggle(led: Led) {
    if !ENABLED.load(Ordering::Relaxed) {
        return;
    }
    let was_on = led.level().fetch_xor(true, Ordering::Relaxed);
    hw_init::gpio_write(led.gpio(), !was_on);
}

pub fn is_on(led: Led) -> bool {
    led.level().load(Ordering::Relaxed)
}
