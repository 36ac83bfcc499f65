//! 1 Hz time base using ESP-IDF's esp_timer API.
//!
//! A periodic esp_timer drives the per-second aggregation in
//! [`crate::timebase`].  The callback runs in the ESP timer task (not an
//! ISR); the counters it touches are guarded by a critical section, so it
//! is still race-free against the GM pulse ISR.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::drivers::hw_init::HwInitError;

/// Time-base period.  Fixed: the minute window is 60 of these.
pub const TIME_BASE_PERIOD_US: u64 = 1_000_000;

#[cfg(target_os = "espidf")]
static mut TIME_BASE_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn time_base_cb(_arg: *mut core::ffi::c_void) {
    crate::timebase::second_tick_handler();
}

/// Start the 1 Hz time base.
#[cfg(target_os = "espidf")]
pub fn start_time_base() -> Result<(), HwInitError> {
    // SAFETY: TIME_BASE_TIMER is written here once at boot from the single
    // main-task context before the callback can fire.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(time_base_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"timebase".as_ptr(),
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut TIME_BASE_TIMER);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerCreateFailed(ret));
        }
        let ret = esp_timer_start_periodic(TIME_BASE_TIMER, TIME_BASE_PERIOD_US);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerCreateFailed(ret));
        }
    }
    log::info!("hw_timer: time base @1Hz started");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_time_base() -> Result<(), HwInitError> {
    log::info!("hw_timer(sim): time base not started (ticks driven by caller)");
    Ok(())
}
