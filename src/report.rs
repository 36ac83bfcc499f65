//! Report line model: dose conversion, rendering and parsing.
//!
//! One line per reporting window, fixed template, every number five
//! zero-padded digits:
//!
//! ```text
//! RELATIVE TIME = 00042 seconds, GEIGER MULLER PROTOTYTPE REPORTING CURRENT COUNTER = 00017, CPM = 00100, uSv/h = 05700\n\r
//! ```
//!
//! The template (including its spelling and the `\n\r` ending) is what
//! deployed receivers match on, so it is reproduced byte for byte.

use core::fmt;

use crate::counts::Counts;
use crate::decimal::{self, DIGITS};

const PREFIX: &str = "RELATIVE TIME = ";
const AFTER_SECONDS: &str = " seconds, GEIGER MULLER PROTOTYTPE REPORTING CURRENT COUNTER = ";
const AFTER_COUNTER: &str = ", CPM = ";
const AFTER_CPM: &str = ", uSv/h = ";
pub const LINE_END: &str = "\n\r";

/// Rendered length of every report line.
pub const REPORT_LINE_LEN: usize = PREFIX.len()
    + AFTER_SECONDS.len()
    + AFTER_COUNTER.len()
    + AFTER_CPM.len()
    + LINE_END.len()
    + 4 * DIGITS;

pub const REPORT_LINE_CAP: usize = 128;

pub type ReportLine = heapless::String<REPORT_LINE_CAP>;

/// Dose rate in raw units (0.0001 µSv/h): `cpm × tube_factor`, wrapping
/// at 16 bits like the rest of the line.
pub fn dose_rate(cpm: u16, tube_factor: u16) -> u16 {
    cpm.wrapping_mul(tube_factor)
}

/// One report's worth of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub elapsed_secs: u16,
    pub current: u16,
    pub cpm: u16,
    pub dose: u16,
    /// The committed minute saw the pulse counter wrap.
    pub counter_wrapped: bool,
    /// `cpm × tube_factor` did not fit in 16 bits.
    pub dose_wrapped: bool,
}

impl Report {
    pub fn from_counts(counts: &Counts, tube_factor: u16) -> Self {
        let cpm = counts.committed;
        Self {
            elapsed_secs: u16::from(counts.elapsed_secs),
            current: counts.current,
            cpm,
            dose: dose_rate(cpm, tube_factor),
            counter_wrapped: counts.committed_overflow,
            dose_wrapped: cpm.checked_mul(tube_factor).is_none(),
        }
    }

    /// Render the full line, terminator included.
    pub fn render(&self) -> ReportLine {
        let mut line = ReportLine::new();
        // REPORT_LINE_LEN < REPORT_LINE_CAP, so pushes cannot fail.
        let _ = line.push_str(PREFIX);
        push_field(&mut line, self.elapsed_secs);
        let _ = line.push_str(AFTER_SECONDS);
        push_field(&mut line, self.current);
        let _ = line.push_str(AFTER_COUNTER);
        push_field(&mut line, self.cpm);
        let _ = line.push_str(AFTER_CPM);
        push_field(&mut line, self.dose);
        let _ = line.push_str(LINE_END);
        line
    }

    /// Parse a received line (terminator optional).  The diagnostic flags
    /// are not on the wire and come back `false`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix(PREFIX)?;
        let (elapsed_secs, rest) = take_field(rest)?;
        let rest = rest.strip_prefix(AFTER_SECONDS)?;
        let (current, rest) = take_field(rest)?;
        let rest = rest.strip_prefix(AFTER_COUNTER)?;
        let (cpm, rest) = take_field(rest)?;
        let rest = rest.strip_prefix(AFTER_CPM)?;
        let (dose, rest) = take_field(rest)?;
        if !(rest.is_empty() || rest == LINE_END) {
            return None;
        }
        Some(Self {
            elapsed_secs,
            current,
            cpm,
            dose,
            counter_wrapped: false,
            dose_wrapped: false,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.render();
        f.write_str(line.trim_end())
    }
}

fn push_field(line: &mut ReportLine, value: u16) {
    for digit in decimal::format(value) {
        let _ = line.push(char::from(digit));
    }
}

fn take_field(s: &str) -> Option<(u16, &str)> {
    let field = s.get(..DIGITS)?;
    let value = decimal::parse(field.as_bytes())?;
    Some((value, &s[DIGITS..]))
}
