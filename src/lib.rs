//! streampad - five-key stream control pad firmware.
//!
//! The control logic (debounce, event queue, stream state, confirmation
//! timer, screen state machine) is pure and host-testable: it reaches
//! hardware only through the capability traits in [`io`].
//!
//! Usage: `cargo test` (host) builds this library plus the mocks in
//! `tests/`; the embedded binary in `main.rs` needs the `embedded`
//! feature and a Raspberry Pi Pico.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod confirm;
pub mod control;
pub mod error;
pub mod event;
pub mod input;
pub mod io;
pub mod keymap;
pub mod screen;
pub mod stream;

// Hardware bindings for the RP2040 target.
#[cfg(feature = "embedded")]
pub mod board;
#[cfg(feature = "embedded")]
pub mod oled;
#[cfg(feature = "embedded")]
pub mod usb;
