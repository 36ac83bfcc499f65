//! Fuzz target: `Report::parse_line`
//!
//! Feeds arbitrary text to the report-line parser and asserts that it
//! never panics, and that anything it accepts renders back to a line that
//! parses to the same values.
//!
//! cargo fuzz run fuzz_report_parser

#![no_main]

use gmcounter::report::{REPORT_LINE_LEN, Report};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Some(report) = Report::parse_line(text) {
        let line = report.render();
        assert_eq!(line.len(), REPORT_LINE_LEN);
        assert_eq!(Report::parse_line(&line), Some(report));
    }
});
