//! Hardware drivers: one-shot bring-up, timers, GPIO and the software UART.

pub mod bit_timer;
pub mod button;
pub mod debug_led;
pub mod gpio_out;
pub mod hw_init;
pub mod hw_timer;
pub mod soft_uart;
