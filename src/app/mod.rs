//! Application core: the reporting loop and the ports it talks through.
//!
//! Nothing in here touches hardware.  Counts come in through
//! [`ports::CountSource`], report bytes leave through [`ports::SerialSink`]
//! and diagnostics through [`ports::EventSink`], so the whole loop runs on
//! the host against mocks.

pub mod events;
pub mod ports;
pub mod service;
