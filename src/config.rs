//! System configuration parameters
//!
//! Compile-time defaults for the counter.  The device has no persistent
//! storage and a fixed reporting cadence, so this is only the handful of
//! values that tie the firmware to the tube and to the serial receiver.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest tolerated deviation between the configured baud rate and the
/// rate the integer bit period actually produces (2 %).  Beyond this an
/// 8N1 receiver starts sampling the stop bit in the wrong slot.
pub const MAX_BAUD_ERROR_PPM: u32 = 20_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeigerConfig {
    // --- Tube ---
    /// CPM → dose multiplier, raw units of 0.0001 µSv/h per count/minute.
    pub tube_factor: u16,

    // --- Software UART ---
    /// Serial line speed.
    pub baud_rate: u32,
    /// Resolution of the bit-timing compare timer.
    pub bit_timer_hz: u32,

    // --- Debug ---
    /// Toggle the red LED per pulse and the green LED per button press.
    pub debug_leds: bool,
}

impl Default for GeigerConfig {
    fn default() -> Self {
        Self {
            tube_factor: 57, // 0.0057 µSv/h per CPM

            baud_rate: 9600,
            bit_timer_hz: 1_000_000,

            debug_leds: true,
        }
    }
}

impl GeigerConfig {
    /// Compare-timer ticks per transmitted bit (104 at 9600 Bd / 1 MHz).
    pub fn bit_period_ticks(&self) -> u32 {
        self.bit_timer_hz / self.baud_rate.max(1)
    }

    /// Relative error of the achieved baud rate, in parts per million.
    pub fn baud_error_ppm(&self) -> u32 {
        let ticks = u64::from(self.bit_period_ticks());
        if ticks == 0 {
            return u32::MAX;
        }
        let nominal = u64::from(self.bit_timer_hz);
        let ideal = u64::from(self.baud_rate) * ticks;
        (nominal.abs_diff(ideal) * 1_000_000 / nominal) as u32
    }

    /// Reject configurations that cannot produce a readable serial line.
    pub fn validate(&self) -> Result<()> {
        if self.tube_factor == 0 {
            return Err(Error::Config("tube_factor must be non-zero"));
        }
        if self.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero"));
        }
        if self.bit_timer_hz < self.baud_rate {
            return Err(Error::Config("bit timer slower than baud rate"));
        }
        if self.baud_error_ppm() > MAX_BAUD_ERROR_PPM {
            return Err(Error::Config("baud rate error above 2%"));
        }
        Ok(())
    }

    /// Startup calibration precondition: the bit timer must run at exactly
    /// the configured resolution, otherwise every bit period is off.
    pub fn check_timer_resolution(&self, measured_hz: u32) -> Result<()> {
        if measured_hz == self.bit_timer_hz {
            Ok(())
        } else {
            Err(Error::Calibration {
                expected_hz: self.bit_timer_hz,
                measured_hz,
            })
        }
    }
}
