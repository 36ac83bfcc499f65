//! Radiation sensing.
//!
//! A single GM tube on [`crate::pins::GM_INPUT_GPIO`]; the tube's high
//! voltage supply and pulse shaping are analogue hardware, so the firmware
//! side is only the edge counter.

pub mod geiger;
