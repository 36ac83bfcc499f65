//! Adapters: concrete implementations of the port traits.
//!
//! | Port          | Implemented by                     | Connects to             |
//! |---------------|------------------------------------|-------------------------|
//! | `CountSource` | `counts::SharedCounts`             | pulse / time-base ISRs  |
//! | `SerialSink`  | `drivers::soft_uart::SoftUartCell` | bit-banged TX GPIO      |
//! | `EventSink`   | `log_sink::LogEventSink`           | ESP-IDF log console     |

pub mod log_sink;
