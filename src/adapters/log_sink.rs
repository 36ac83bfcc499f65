//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (USB-CDC console in production).  The console is separate from
//! the report line, so nothing here can disturb a receiver parsing reports.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { emitted: 0 }
    }

    /// Events written since construction.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            AppEvent::Started {
                tube_factor,
                baud_rate,
            } => {
                info!("START | tube_factor={} | line={} Bd 8N1", tube_factor, baud_rate);
            }
            AppEvent::ReportSent(r) => {
                debug!(
                    "REPORT | t={}s | current={} | cpm={} | dose={}",
                    r.elapsed_secs, r.current, r.cpm, r.dose
                );
            }
            AppEvent::CounterWrapped { cpm } => {
                warn!("WRAP | pulse counter overflowed, cpm={} understated", cpm);
            }
            AppEvent::DoseWrapped { cpm, dose } => {
                warn!("WRAP | dose field overflowed, cpm={} sent as {}", cpm, dose);
            }
            AppEvent::ButtonPressed { presses } => {
                info!("BUTTON | presses={}", presses);
            }
        }
    }
}
