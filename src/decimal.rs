//! Fixed-width ASCII decimal formatting for `u16` values.
//!
//! Every report field is exactly [`DIGITS`] characters wide, zero padded,
//! most significant digit first.  `65535` is the widest `u16`, so five
//! digits cover the whole domain and no value ever needs truncation.

/// Width of a formatted field.  `u16::MAX` = 65535 has five digits.
pub const DIGITS: usize = 5;

const ASCII_ZERO: u8 = b'0';

/// Format `value` as five zero-padded ASCII digits.
///
/// The output is not terminated; callers that need a terminator append it.
pub const fn format(value: u16) -> [u8; DIGITS] {
    let mut out = [ASCII_ZERO; DIGITS];
    let mut rest = value;
    let mut i = DIGITS;
    while i > 0 {
        i -= 1;
        out[i] = ASCII_ZERO + (rest % 10) as u8;
        rest /= 10;
    }
    out
}

/// Inverse of [`format`]: parse exactly five ASCII digits.
///
/// Returns `None` for the wrong width, non-digit bytes, or a value that
/// does not fit in a `u16` (e.g. `"99999"`).
pub fn parse(digits: &[u8]) -> Option<u16> {
    if digits.len() != DIGITS {
        return None;
    }
    let mut acc: u32 = 0;
    for &d in digits {
        if !d.is_ascii_digit() {
            return None;
        }
        acc = acc * 10 + u32::from(d - ASCII_ZERO);
    }
    u16::try_from(acc).ok()
}
