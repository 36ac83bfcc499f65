//! General-purpose hardware timer pacing the software UART.
//!
//! One GPTimer counts up at `bit_timer_hz` (1 MHz by default) with an
//! auto-reloading alarm at [`GeigerConfig::bit_period_ticks`].  The alarm
//! ISR calls [`TX_LINE.on_bit_tick()`](crate::drivers::soft_uart::TX_LINE),
//! which disarms the timer again once the frame is out.
//!
//! Construction doubles as the calibration check: if the driver cannot
//! hit the requested resolution exactly, every bit period would be wrong,
//! so [`GpBitTimer::new`] fails with [`Error::Calibration`] and the
//! firmware halts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

use crate::config::GeigerConfig;
use crate::drivers::soft_uart::BitTimer;
use crate::error::Result;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init::HwInitError;

pub struct GpBitTimer {
    #[cfg(target_os = "espidf")]
    handle: gptimer_handle_t,
    armed: bool,
    arm_count: u32,
    period_ticks: u32,
}

// SAFETY: the GPTimer handle is an opaque driver object.  After `new()`
// returns it is only used through `arm`/`disarm`, and those are only
// reached through the critical section inside `SoftUartCell`.
#[cfg(target_os = "espidf")]
unsafe impl Send for GpBitTimer {}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn bit_alarm_isr(
    _timer: gptimer_handle_t,
    _edata: *const gptimer_alarm_event_data_t,
    _user_ctx: *mut core::ffi::c_void,
) -> bool {
    crate::drivers::soft_uart::TX_LINE.on_bit_tick();
    false // no higher-priority task woken
}

impl GpBitTimer {
    /// Create, calibrate-check and enable the bit timer.  The alarm is set
    /// up but counting does not start until the first [`BitTimer::arm`].
    #[cfg(target_os = "espidf")]
    pub fn new(config: &GeigerConfig) -> Result<Self> {
        let period_ticks = config.bit_period_ticks();
        let mut handle: gptimer_handle_t = core::ptr::null_mut();

        // SAFETY: called once from main() during bring-up, before the
        // timer is shared with the ISR.  All pointers are to locals that
        // outlive the calls.
        unsafe {
            let timer_cfg = gptimer_config_t {
                clk_src: soc_periph_gptimer_clk_src_t_GPTIMER_CLK_SRC_DEFAULT,
                direction: gptimer_count_direction_t_GPTIMER_COUNT_UP,
                resolution_hz: config.bit_timer_hz,
                ..Default::default()
            };
            let ret = gptimer_new_timer(&timer_cfg, &mut handle);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::TimerCreateFailed(ret).into());
            }

            let mut measured_hz: u32 = 0;
            let ret = gptimer_get_resolution(handle, &mut measured_hz);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::TimerCreateFailed(ret).into());
            }
            config.check_timer_resolution(measured_hz)?;

            let mut alarm = gptimer_alarm_config_t {
                alarm_count: u64::from(period_ticks),
                reload_count: 0,
                ..Default::default()
            };
            alarm.flags.set_auto_reload_on_alarm(1);
            let ret = gptimer_set_alarm_action(handle, &alarm);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::TimerCreateFailed(ret).into());
            }

            let callbacks = gptimer_event_callbacks_t {
                on_alarm: Some(bit_alarm_isr),
            };
            let ret = gptimer_register_event_callbacks(handle, &callbacks, core::ptr::null_mut());
            if ret != ESP_OK as i32 {
                return Err(HwInitError::IsrInstallFailed(ret).into());
            }

            let ret = gptimer_enable(handle);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::TimerCreateFailed(ret).into());
            }
        }

        info!(
            "bit_timer: {} Hz, {} ticks/bit ({} Bd nominal)",
            config.bit_timer_hz, period_ticks, config.baud_rate
        );
        Ok(Self {
            handle,
            armed: false,
            arm_count: 0,
            period_ticks,
        })
    }

    /// Simulation stand-in: runs the same calibration check against the
    /// nominal resolution and tracks the armed flag in memory.
    #[cfg(not(target_os = "espidf"))]
    pub fn new(config: &GeigerConfig) -> Result<Self> {
        config.check_timer_resolution(config.bit_timer_hz)?;
        let period_ticks = config.bit_period_ticks();
        info!("bit_timer(sim): {} ticks/bit", period_ticks);
        Ok(Self {
            armed: false,
            arm_count: 0,
            period_ticks,
        })
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Frames started since boot.
    pub fn arm_count(&self) -> u32 {
        self.arm_count
    }

    pub fn period_ticks(&self) -> u32 {
        self.period_ticks
    }
}

impl BitTimer for GpBitTimer {
    fn arm(&mut self) {
        #[cfg(target_os = "espidf")]
        // SAFETY: handle is valid and enabled; GPTimer control calls are
        // ISR-safe and serialised by the SoftUartCell critical section.
        unsafe {
            gptimer_set_raw_count(self.handle, 0);
            if !self.armed {
                gptimer_start(self.handle);
            }
        }
        self.armed = true;
        self.arm_count = self.arm_count.wrapping_add(1);
    }

    fn disarm(&mut self) {
        #[cfg(target_os = "espidf")]
        // SAFETY: see `arm`.  Stopping an already-stopped timer is avoided
        // via the `armed` flag.
        unsafe {
            if self.armed {
                gptimer_stop(self.handle);
            }
        }
        self.armed = false;
    }
}
