//! Timer-driven software UART transmitter (8N1, TX only).
//!
//! There is no UART peripheral on the report line.  A compare timer fires
//! once per bit period and its ISR shifts the next bit of the in-flight
//! frame onto a plain GPIO:
//!
//! ```text
//!  idle ─┐   ┌─b0─┬─b1─┬─ … ─┬─b7─┐┌── stop ──┐ idle
//!        └───┘                      (high)
//!        start
//!  tick:  1    2    3        9    10      11 → timer disarmed
//! ```
//!
//! ## Ownership
//!
//! At most one frame is in flight.  The foreground code loads a frame and
//! arms the timer; from then on the frame belongs to the tick handler until
//! the eleventh tick returns it to [`TxState::Idle`] and disarms the timer.
//! [`SoftUartCell::transmit`] busy-waits for that hand-back before loading
//! the next byte, which is the only back-pressure in the system.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::SerialSink;
use crate::drivers::bit_timer::GpBitTimer;
use crate::drivers::gpio_out::GpioOutput;

/// Bits shifted per frame: start + 8 data + stop.
pub const FRAME_BITS: u8 = 10;

const STOP_BIT: u16 = 1 << 8;

/// Hardware compare timer pacing the bit clock.
pub trait BitTimer {
    /// Restart counting from zero and enable the compare interrupt, so the
    /// first tick lands one full bit period from now.
    fn arm(&mut self);

    /// Disable the compare interrupt.  Called from the tick handler.
    fn disarm(&mut self);
}

// ---------------------------------------------------------------------------
// Frame state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Idle,
    /// `shift` holds the bits still to send, LSB next; `remaining` counts
    /// them down from [`FRAME_BITS`].
    Transmitting { shift: u16, remaining: u8 },
}

/// Result of feeding one timer tick to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitTick {
    /// Drive the TX pin to this level.
    Drive { high: bool },
    /// All bits are out; the stop bit has been held for a full period.
    Complete,
    /// Tick arrived with nothing in flight.
    Spurious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxFrame {
    state: TxState,
}

impl TxFrame {
    pub const fn new() -> Self {
        Self {
            state: TxState::Idle,
        }
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == TxState::Idle
    }

    /// Load `byte` with its framing bits.  Refused while a frame is in
    /// flight.
    pub fn load(&mut self, byte: u8) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = TxState::Transmitting {
            shift: (u16::from(byte) | STOP_BIT) << 1,
            remaining: FRAME_BITS,
        };
        true
    }

    /// Advance by one bit period.
    pub fn tick(&mut self) -> BitTick {
        match self.state {
            TxState::Idle => BitTick::Spurious,
            TxState::Transmitting { remaining: 0, .. } => {
                self.state = TxState::Idle;
                BitTick::Complete
            }
            TxState::Transmitting { shift, remaining } => {
                self.state = TxState::Transmitting {
                    shift: shift >> 1,
                    remaining: remaining - 1,
                };
                BitTick::Drive {
                    high: shift & 1 != 0,
                }
            }
        }
    }
}

impl Default for TxFrame {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Transmitter: frame + pin + timer
// ---------------------------------------------------------------------------

pub struct SoftUart<P, T> {
    frame: TxFrame,
    pin: P,
    timer: T,
}

impl<P: OutputPin, T: BitTimer> SoftUart<P, T> {
    /// Take ownership of the TX pin and bit timer.  The line is driven to
    /// its idle (high) level immediately.
    pub fn new(mut pin: P, timer: T) -> Self {
        let _ = pin.set_high();
        Self {
            frame: TxFrame::new(),
            pin,
            timer,
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.frame.is_idle()
    }

    pub fn frame(&self) -> &TxFrame {
        &self.frame
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Load and arm if the line is free.  Never waits.
    pub fn try_transmit(&mut self, byte: u8) -> bool {
        if !self.frame.load(byte) {
            return false;
        }
        self.timer.arm();
        true
    }

    /// Bit-timer ISR body.
    pub fn on_bit_tick(&mut self) {
        match self.frame.tick() {
            BitTick::Drive { high } => {
                // Pin errors have no reporting path; the receiver sees a
                // corrupted frame.
                let _ = self.pin.set_state(PinState::from(high));
            }
            BitTick::Complete | BitTick::Spurious => self.timer.disarm(),
        }
    }

    pub fn release(self) -> (P, T) {
        (self.pin, self.timer)
    }
}

// ---------------------------------------------------------------------------
// Interrupt-shared handle
// ---------------------------------------------------------------------------

/// A [`SoftUart`] reachable from both the bit-timer ISR and the foreground
/// loop.  Each access is one short critical section; the busy-wait in
/// [`transmit`](Self::transmit) spins *outside* it so ticks keep arriving.
pub struct SoftUartCell<P, T> {
    inner: Mutex<RefCell<Option<SoftUart<P, T>>>>,
}

impl<P, T> SoftUartCell<P, T> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    pub fn install(&self, uart: SoftUart<P, T>) {
        critical_section::with(|cs| {
            self.inner.borrow_ref_mut(cs).replace(uart);
        });
    }

    pub fn take(&self) -> Option<SoftUart<P, T>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` on the transmitter inside a critical section.  `None` if
    /// nothing is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut SoftUart<P, T>) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<P: OutputPin, T: BitTimer> SoftUartCell<P, T> {
    /// Bit-timer ISR entry point.
    pub fn on_bit_tick(&self) {
        self.with(SoftUart::on_bit_tick);
    }

    pub fn is_busy(&self) -> bool {
        self.with(|uart| uart.is_busy()).unwrap_or(false)
    }

    /// Wait for the previous frame to finish, then load and arm `byte`.
    /// Returns as soon as the timer is armed.  Bytes sent before
    /// [`install`](Self::install) are dropped.
    pub fn transmit(&self, byte: u8) {
        loop {
            match self.with(|uart| uart.try_transmit(byte)) {
                Some(true) | None => return,
                Some(false) => core::hint::spin_loop(),
            }
        }
    }
}

impl<P, T> Default for SoftUartCell<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, T: BitTimer> SerialSink for SoftUartCell<P, T> {
    fn transmit(&self, byte: u8) {
        SoftUartCell::transmit(self, byte);
    }
}

/// The report line: installed by `main` after bring-up, ticked by the
/// bit-timer ISR.
pub static TX_LINE: SoftUartCell<GpioOutput, GpBitTimer> = SoftUartCell::new();
