//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, hardware pin assignments, USB identity and
//! screen layout constants live here so they can be tuned in one place.

// Scheduling

/// Top-level scheduler tick (ms). Every periodic activity runs as a
/// multiple of this.
pub const SCHED_TICK_MS: u64 = 10;

/// Key sampling / software debounce interval (ms).
pub const SAMPLE_INTERVAL_MS: u64 = 50;

/// Blink phase toggle interval (ms). 500 ms on, 500 ms off.
pub const BLINK_INTERVAL_MS: u64 = 500;

/// Screen redraw interval (ms).
pub const REDRAW_INTERVAL_MS: u64 = 100;

/// How long a confirmation dialog waits for an answer before it
/// cancels itself (ms).
pub const CONFIRM_WINDOW_MS: u64 = 10_000;

/// Event queue capacity. Bounded in practice by the key count; one
/// drain pass never leaves more than a handful of events pending.
pub const EVENT_QUEUE_DEPTH: usize = 16;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "streampad";
pub const USB_PRODUCT: &str = "Stream Control Pad";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

// GPIO pin assignments (Raspberry Pi Pico)
//
// These are logical names; actual `embassy_rp::peripherals::*` pins are
// wired up in `main.rs`.
//
//   Key BRB        → GP8   (top right)
//   Key MUTE       → GP9   (top left)
//   Key UI_LEFT    → GP13  (bottom left)
//   Key UI_RIGHT   → GP27  (bottom middle)
//   Key START_STOP → GP5   (bottom right)
//   LED pause      → GP28  (board silkscreen says 29; it is 28)
//   LED mute       → GP15
//   I²C SDA        → GP0
//   I²C SCL        → GP1

// Screen layout (128x64 SSD1306)

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;

/// Main content area, inset from the frame.
pub const CONTENT_X: i32 = 2;
pub const CONTENT_Y: i32 = 2;
pub const CONTENT_WIDTH: u32 = 124;
pub const CONTENT_HEIGHT: u32 = 47;

/// On-screen soft buttons above the two UI keys.
pub const BUTTON_WIDTH: u32 = 60;
pub const BUTTON_HEIGHT: u32 = 11;
pub const BUTTON_Y: i32 = 53;
pub const BUTTON_LEFT_X: i32 = 2;
pub const BUTTON_RIGHT_X: i32 = 65;

/// Confirmation progress bar.
pub const BAR_X: i32 = 2;
pub const BAR_Y: i32 = 28;
pub const BAR_WIDTH: u32 = 124;
pub const BAR_HEIGHT: u32 = 16;

/// Fixed-width font cell used for text centring.
pub const FONT_WIDTH: i32 = 6;
