//! Outbound application events.
//!
//! The [`ReportingLoop`](super::service::ReportingLoop) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  They never reach the
//! report line; that carries only the fixed-format report.

use crate::report::Report;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Bring-up finished and counting has begun.
    Started { tube_factor: u16, baud_rate: u32 },

    /// A report line was handed to the transmitter.
    ReportSent(Report),

    /// The per-minute pulse counter wrapped past 65535 during the minute
    /// now reported as CPM.
    CounterWrapped { cpm: u16 },

    /// `cpm × tube_factor` did not fit in the five-digit dose field.
    DoseWrapped { cpm: u16, dose: u16 },

    /// The debug button was pressed; carries the running total.
    ButtonPressed { presses: u32 },
}
