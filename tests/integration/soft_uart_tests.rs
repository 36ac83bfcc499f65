//! Integration tests for the software UART: framing on the pin, blocking
//! transmit against a concurrently ticking bit timer, and the full report
//! path from counters to decoded serial bytes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use gmcounter::app::ports::SerialSink;
use gmcounter::app::service::ReportingLoop;
use gmcounter::config::GeigerConfig;
use gmcounter::counts::SharedCounts;
use gmcounter::drivers::bit_timer::GpBitTimer;
use gmcounter::drivers::gpio_out::GpioOutput;
use gmcounter::drivers::soft_uart::{SoftUart, SoftUartCell};

use super::mock_hw::{EventLog, RecordingPin, SimTimer, decode_8n1};

type TestLine = SoftUartCell<RecordingPin, SimTimer>;

/// Run `send` while a second thread plays the bit-timer ISR, then return
/// every level driven after the initial idle.
fn transmit_with_ticker(send: impl FnOnce(&TestLine)) -> Vec<bool> {
    let line = TestLine::new();
    line.install(SoftUart::new(RecordingPin::default(), SimTimer::default()));
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            while !done.load(Ordering::Acquire) {
                line.on_bit_tick();
                thread::yield_now();
            }
        });
        send(&line);
        while line.is_busy() {
            thread::yield_now();
        }
        done.store(true, Ordering::Release);
    });

    let uart = line.take().expect("uart installed");
    let (pin, timer) = uart.release();
    assert!(!timer.armed, "timer left armed after last frame");
    assert!(pin.levels[0], "line must start idle high");
    pin.levels[1..].to_vec()
}

// ── Framing ───────────────────────────────────────────────────

#[test]
fn letter_a_frames_as_start_data_stop() {
    let mut uart = SoftUart::new(RecordingPin::default(), SimTimer::default());
    assert!(uart.try_transmit(0x41));
    for _ in 0..11 {
        uart.on_bit_tick();
    }

    let levels = &uart.pin().levels;
    assert_eq!(
        levels[1..],
        [false, true, false, false, false, false, false, true, false, true]
    );
    assert_eq!(decode_8n1(&levels[1..]), Some(vec![0x41]));
    assert_eq!(uart.pin().last_level(), Some(true));
    assert_eq!(uart.timer().disarms, 1);
}

#[test]
fn line_idles_high_between_frames() {
    let mut uart = SoftUart::new(RecordingPin::default(), SimTimer::default());
    for byte in [0x00, 0xFF] {
        assert!(uart.try_transmit(byte));
        for _ in 0..11 {
            uart.on_bit_tick();
        }
        assert_eq!(uart.pin().last_level(), Some(true));
        assert!(!uart.timer().armed);
    }
    assert_eq!(decode_8n1(&uart.pin().levels[1..]), Some(vec![0x00, 0xFF]));
    assert_eq!(uart.timer().arms, 2);
}

#[test]
fn ticks_while_idle_drive_nothing() {
    let mut uart = SoftUart::new(RecordingPin::default(), SimTimer::default());
    uart.on_bit_tick();
    uart.on_bit_tick();
    assert_eq!(uart.pin().levels, [true]);
}

// ── Blocking transmit ─────────────────────────────────────────

#[test]
fn print_waits_for_each_frame() {
    let msg = b"GM\n\r";
    let levels = transmit_with_ticker(|line| line.print(msg));
    assert_eq!(decode_8n1(&levels), Some(msg.to_vec()));
}

#[test]
fn every_byte_value_survives_the_line() {
    let all: Vec<u8> = (0..=255).collect();
    let levels = transmit_with_ticker(|line| line.print(&all));
    assert_eq!(decode_8n1(&levels), Some(all));
}

// ── Full report path ──────────────────────────────────────────

#[test]
fn report_line_decodes_from_pin_levels() {
    let counts = SharedCounts::new();
    for _ in 0..100 {
        counts.record_pulse();
    }
    for _ in 0..60 {
        counts.second_elapsed();
    }
    let mut rl = ReportingLoop::new(&GeigerConfig::default());
    let mut events = EventLog::new();

    let mut sent = None;
    let levels = transmit_with_ticker(|line| {
        sent = rl.poll(&counts, line, &mut events);
    });

    let report = sent.expect("report at t=0");
    let bytes = decode_8n1(&levels).expect("clean framing");
    assert_eq!(bytes, report.render().as_bytes());
    assert!(
        String::from_utf8(bytes)
            .expect("ascii")
            .ends_with("CPM = 00100, uSv/h = 05700\n\r")
    );
}

// ── Device types on the host ──────────────────────────────────

#[test]
fn gpio_and_gp_timer_complete_a_frame() {
    let config = GeigerConfig::default();
    let timer = GpBitTimer::new(&config).expect("sim timer");
    let mut uart = SoftUart::new(GpioOutput::new(17), timer);
    assert!(uart.pin().level());

    assert!(uart.try_transmit(b'R'));
    assert!(uart.timer().is_armed());
    uart.on_bit_tick();
    assert!(!uart.pin().level(), "start bit");
    for _ in 0..10 {
        uart.on_bit_tick();
    }
    assert!(uart.pin().level(), "stop bit / idle");
    assert!(!uart.timer().is_armed());
    assert_eq!(uart.timer().arm_count(), 1);
}
