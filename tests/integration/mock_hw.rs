//! Mock hardware for integration tests.
//!
//! Records every pin level, timer call, serial byte and event so tests can
//! assert on the full history without touching real GPIO or timers.

use std::cell::RefCell;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use gmcounter::app::events::AppEvent;
use gmcounter::app::ports::{EventSink, SerialSink};
use gmcounter::drivers::soft_uart::{BitTimer, FRAME_BITS};

// ── RecordingPin ──────────────────────────────────────────────

/// TX pin that keeps every level it was driven to.
#[derive(Debug, Default)]
pub struct RecordingPin {
    pub levels: Vec<bool>,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.push(true);
        Ok(())
    }
}

#[allow(dead_code)]
impl RecordingPin {
    pub fn last_level(&self) -> Option<bool> {
        self.levels.last().copied()
    }
}

// ── SimTimer ──────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct SimTimer {
    pub armed: bool,
    pub arms: u32,
    pub disarms: u32,
}

impl BitTimer for SimTimer {
    fn arm(&mut self) {
        self.armed = true;
        self.arms += 1;
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.disarms += 1;
    }
}

// ── WireSink ──────────────────────────────────────────────────

/// Serial sink that captures the report bytes directly.
#[derive(Debug, Default)]
pub struct WireSink {
    bytes: RefCell<Vec<u8>>,
}

#[allow(dead_code)]
impl WireSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text()
            .split_inclusive("\n\r")
            .map(str::to_owned)
            .collect()
    }

    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }
}

impl SerialSink for WireSink {
    fn transmit(&self, byte: u8) {
        self.bytes.borrow_mut().push(byte);
    }
}

// ── EventLog ──────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── 8N1 decoding ──────────────────────────────────────────────

/// Decode per-bit pin levels into bytes.  `levels` must start at a start
/// bit; each frame is exactly [`FRAME_BITS`] levels.  Returns `None` on a
/// framing error (start not low, stop not high, or a partial frame).
#[allow(dead_code)]
pub fn decode_8n1(levels: &[bool]) -> Option<Vec<u8>> {
    let frame = usize::from(FRAME_BITS);
    if levels.len() % frame != 0 {
        return None;
    }
    levels
        .chunks(frame)
        .map(|bits| {
            if bits[0] || !bits[frame - 1] {
                return None;
            }
            let byte = bits[1..frame - 1]
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &b)| acc | (u8::from(b) << i));
            Some(byte)
        })
        .collect()
}
