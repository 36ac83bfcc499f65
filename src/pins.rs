//! GPIO pin assignments for the GM counter board.
//!
//! Every driver references this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Inputs (falling-edge interrupts, internal pull-up)
// ---------------------------------------------------------------------------

/// GM tube cathode pulse line.  One falling edge per particle strike.
pub const GM_INPUT_GPIO: i32 = 4;

/// Debug push-button, active low.
pub const BUTTON_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Debug LEDs
// ---------------------------------------------------------------------------

/// Toggled on every detected pulse.
pub const RED_LED_GPIO: i32 = 5;
/// Lit once bring-up completes; toggled by the debug button.
pub const GREEN_LED_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Software UART
// ---------------------------------------------------------------------------

/// Bit-banged TX line.  Idles high.
pub const UART_TX_GPIO: i32 = 17;
