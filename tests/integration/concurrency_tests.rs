//! Concurrency tests for the interrupt-shared counters.
//!
//! Threads stand in for the pulse ISR, the 1 Hz time base and the main
//! loop; the critical-section `std` implementation serialises them the
//! way interrupt masking does on the device.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use gmcounter::app::ports::CountSource;
use gmcounter::counts::SharedCounts;
use gmcounter::timebase::TickOutcome;

const PULSE_THREADS: u32 = 4;
const PULSES_PER_THREAD: u32 = 5_000;

#[test]
fn concurrent_pulses_and_ticks_lose_nothing() {
    let counts = SharedCounts::new();
    let mut committed_total = 0u32;

    thread::scope(|s| {
        let pulsers: Vec<_> = (0..PULSE_THREADS)
            .map(|_| {
                s.spawn(|| {
                    for _ in 0..PULSES_PER_THREAD {
                        counts.record_pulse();
                    }
                })
            })
            .collect();

        // time base running while pulses arrive
        for _ in 0..150 {
            if let TickOutcome::MinuteRollover { cpm } = counts.second_elapsed() {
                committed_total += u32::from(cpm);
            }
            thread::yield_now();
        }

        for p in pulsers {
            p.join().expect("pulse thread");
        }
    });

    let snap = counts.snapshot();
    assert_eq!(snap.elapsed_secs, 30);
    assert!(!snap.pending_overflow);
    assert_eq!(
        committed_total + u32::from(snap.current),
        PULSE_THREADS * PULSES_PER_THREAD
    );
}

#[test]
fn snapshots_are_never_torn() {
    let counts = SharedCounts::new();
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            // each step keeps current == elapsed_secs until the rollover
            // resets both to zero together
            for _ in 0..600 {
                counts.update(|c| {
                    gmcounter::timebase::advance(c);
                    if c.elapsed_secs != 0 {
                        gmcounter::sensors::geiger::count_pulse(c);
                    }
                });
            }
            done.store(true, Ordering::Release);
        });

        while !done.load(Ordering::Acquire) {
            let snap = CountSource::snapshot(&counts);
            assert_eq!(u16::from(snap.elapsed_secs), snap.current);
            assert!(snap.elapsed_secs < 60);
        }
    });
}
