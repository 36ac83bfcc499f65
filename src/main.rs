//! GM counter firmware: main entry point.
//!
//! ```text
//!  GM tube ──▶ [GPIO ISR] ──▶ COUNTS ◀── [1 Hz esp_timer] time base
//!                               │
//!                               ▼
//!                        ReportingLoop (main loop, even seconds)
//!                               │ report line
//!                               ▼
//!                TX_LINE ◀── [GPTimer ISR, one tick per bit] ──▶ TX GPIO
//! ```
//!
//! Bring-up is fail-stop: any init or calibration error is logged and the
//! firmware parks without ever sending a report.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::delay::FreeRtos;
use log::info;

use gmcounter::adapters::log_sink::LogEventSink;
use gmcounter::app::events::AppEvent;
use gmcounter::app::ports::EventSink;
use gmcounter::app::service::ReportingLoop;
use gmcounter::config::GeigerConfig;
use gmcounter::counts::COUNTS;
use gmcounter::drivers::bit_timer::GpBitTimer;
use gmcounter::drivers::button::ButtonMonitor;
use gmcounter::drivers::debug_led::{self, Led};
use gmcounter::drivers::gpio_out::GpioOutput;
use gmcounter::drivers::soft_uart::{SoftUart, TX_LINE};
use gmcounter::drivers::{hw_init, hw_timer};
use gmcounter::error::{Error, fail_stop};
use gmcounter::pins;

/// Main-loop yield.  One tick keeps the IDLE task (and its watchdog) fed
/// while staying far below the two-second reporting window.
const LOOP_YIELD_MS: u32 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  GM counter v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = GeigerConfig::default();
    if let Err(e) = config.validate() {
        fail_stop(e);
    }
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 3. Peripherals + bit timer calibration ────────────────
    if let Err(e) = hw_init::init_peripherals() {
        fail_stop(Error::from(e));
    }
    let timer = GpBitTimer::new(&config).unwrap_or_else(|e| fail_stop(e));
    info!(
        "Bit timer: {} ticks/bit at {} Hz",
        timer.period_ticks(),
        config.bit_timer_hz
    );

    TX_LINE.install(SoftUart::new(GpioOutput::new(pins::UART_TX_GPIO), timer));

    debug_led::set_enabled(config.debug_leds);
    debug_led::set(Led::Green, true);

    // ── 4. Interrupts: pulses, button, time base ──────────────
    if let Err(e) = hw_init::init_isr_service() {
        fail_stop(Error::from(e));
    }
    if let Err(e) = hw_timer::start_time_base() {
        fail_stop(Error::from(e));
    }

    // ── 5. Reporting loop ─────────────────────────────────────
    let mut log_sink = LogEventSink::new();
    let mut reporting = ReportingLoop::new(&config);
    let mut button = ButtonMonitor::new();
    reporting.start(&mut log_sink);

    info!("System ready. Entering reporting loop.");

    loop {
        reporting.poll(&COUNTS, &TX_LINE, &mut log_sink);

        if button.poll().is_some() {
            log_sink.emit(&AppEvent::ButtonPressed {
                presses: gmcounter::drivers::button::press_count(),
            });
        }

        FreeRtos::delay_ms(LOOP_YIELD_MS);
    }
}
