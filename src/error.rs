//! Unified error types for the GM counter firmware.
//!
//! The firmware is fail-stop: the only errors it ever produces are startup
//! preconditions, and every one of them ends in [`fail_stop`].  Runtime
//! anomalies such as counter wrap or bit-timing drift are not errors; they
//! are logged as events and otherwise show up as wrong numbers on the line.

use core::fmt;

use log::error;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral bring-up failed.
    Init(HwInitError),
    /// The bit timer does not run at the configured resolution.
    Calibration { expected_hz: u32, measured_hz: u32 },
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Calibration {
                expected_hz,
                measured_hz,
            } => write!(
                f,
                "calibration: bit timer at {measured_hz} Hz, expected {expected_hz} Hz"
            ),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Fail-stop
// ---------------------------------------------------------------------------

/// Log `err` and park forever.  No report is ever produced afterwards.
pub fn fail_stop(err: Error) -> ! {
    error!("FATAL: {}, halting", err);
    #[allow(clippy::empty_loop)]
    loop {
        core::hint::spin_loop();
    }
}
