//! GM counter firmware library.
//!
//! Exposes the counting, time-base, reporting and software-UART logic for
//! integration testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; host builds get
//! in-memory stand-ins.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod counts;
pub mod decimal;
pub mod error;
pub mod pins;
pub mod report;
pub mod timebase;

pub mod adapters;
pub mod drivers;
pub mod sensors;
