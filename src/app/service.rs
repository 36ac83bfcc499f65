//! Reporting loop: the foreground half of the counter.
//!
//! [`ReportingLoop::poll`] is called as often as the main loop spins.  It
//! reads the counters and sends one report line per two-second window,
//! keyed on the parity of the elapsed-seconds counter:
//!
//! ```text
//!  elapsed:  0   1   2   3  ...  58  59   0   1
//!  parity:   E   O   E   O       E   O    E   O
//!  action:   TX  arm TX  arm     TX  arm  TX  arm
//! ```
//!
//! An odd second re-arms the window; the first poll in an even second
//! transmits and closes it.  A loop that never observes second 59 sees
//! 58 → 0 as one even phase and sends only once.

use log::{debug, info, warn};

use crate::config::GeigerConfig;
use crate::report::Report;

use super::events::AppEvent;
use super::ports::{CountSource, EventSink, SerialSink};

// ───────────────────────────────────────────────────────────────
// ReportingLoop
// ───────────────────────────────────────────────────────────────

pub struct ReportingLoop {
    tube_factor: u16,
    baud_rate: u32,
    /// A line has gone out in the current even phase.
    report_sent: bool,
    /// `elapsed_secs` of the last report, used to spot a new minute.
    last_reported_secs: Option<u16>,
    reports: u32,
}

impl ReportingLoop {
    pub fn new(config: &GeigerConfig) -> Self {
        Self {
            tube_factor: config.tube_factor,
            baud_rate: config.baud_rate,
            report_sent: false,
            last_reported_secs: None,
            reports: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            tube_factor: self.tube_factor,
            baud_rate: self.baud_rate,
        });
        info!(
            "ReportingLoop started (tube_factor={}, {} Bd)",
            self.tube_factor, self.baud_rate
        );
    }

    // ── Per-iteration work ────────────────────────────────────

    /// One pass of the main loop.  Returns the report if this pass sent one.
    pub fn poll(
        &mut self,
        counts: &impl CountSource,
        serial: &impl SerialSink,
        sink: &mut impl EventSink,
    ) -> Option<Report> {
        let snapshot = counts.snapshot();

        if snapshot.elapsed_secs % 2 == 1 {
            self.report_sent = false;
            return None;
        }
        if self.report_sent {
            return None;
        }

        let report = Report::from_counts(&snapshot, self.tube_factor);
        serial.print(report.render().as_bytes());
        self.report_sent = true;
        self.reports = self.reports.wrapping_add(1);

        if self.starts_new_minute(report.elapsed_secs) {
            self.flag_wraps(&report, sink);
        }
        self.last_reported_secs = Some(report.elapsed_secs);

        debug!("report #{}: {}", self.reports, report);
        sink.emit(&AppEvent::ReportSent(report));
        Some(report)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether the current even phase has already been reported.
    pub fn report_sent(&self) -> bool {
        self.report_sent
    }

    /// Lines sent since startup.
    pub fn reports_sent(&self) -> u32 {
        self.reports
    }

    pub fn tube_factor(&self) -> u16 {
        self.tube_factor
    }

    // ── Internal ──────────────────────────────────────────────

    fn starts_new_minute(&self, elapsed_secs: u16) -> bool {
        self.last_reported_secs
            .is_none_or(|prev| elapsed_secs <= prev)
    }

    /// CPM is fixed for a whole minute, so wrap diagnostics go out once
    /// per minute rather than with every line.
    fn flag_wraps(&self, report: &Report, sink: &mut impl EventSink) {
        if report.counter_wrapped {
            warn!("pulse counter wrapped during last minute, CPM={} is short", report.cpm);
            sink.emit(&AppEvent::CounterWrapped { cpm: report.cpm });
        }
        if report.dose_wrapped {
            warn!(
                "dose field wrapped: {} CPM x {} > 65535, sent {}",
                report.cpm, self.tube_factor, report.dose
            );
            sink.emit(&AppEvent::DoseWrapped {
                cpm: report.cpm,
                dose: report.dose,
            });
        }
    }
}
