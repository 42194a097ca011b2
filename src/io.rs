//! Capability traits at the hardware seam.
//!
//! The control logic never touches pins, the USB stack or the display
//! driver directly; it consumes these four narrow interfaces. The
//! embedded binary provides the real implementations, host tests
//! provide mocks.

use crate::input::KeyId;
use crate::keymap::Action;

/// Debounced-sampler view of the physical keys.
///
/// Implementations own the active-low electrical detail; `is_pressed`
/// already answers in logical terms.
pub trait PinReader {
    fn is_pressed(&self, key: KeyId) -> bool;
}

/// Outbound keystroke transport.
///
/// `send` presses the chord mapped to `action` and then releases all
/// keys. Safe to call repeatedly; each call is self-contained.
pub trait KeySender {
    fn send(&mut self, action: Action);
}

/// Indicator lights on the pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    /// LED0 - lit/blinking while the stream is paused (BRB).
    Pause,
    /// LED1 - lit/blinking while the microphone is muted.
    Mute,
}

pub trait Leds {
    fn set(&mut self, led: Led, on: bool);
}

/// Bitmap assets loaded at boot. Decoding and pixel composition are the
/// display implementation's problem; the core only names what to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Art {
    /// Idle-page artwork for the content area.
    IdleArt,
    /// "LIVE" banner shown while the stream runs.
    LiveBanner,
    /// First frame of the two-phase pause animation.
    BrbFrameA,
    /// Second frame of the two-phase pause animation.
    BrbFrameB,
}

/// Monochrome drawing surface (128x64).
///
/// The core issues a small fixed sequence of these per page per redraw.
/// Nothing reaches the panel until `flush`.
pub trait Surface {
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool);
    fn blit(&mut self, art: Art, x: i32, y: i32);
    fn text(&mut self, text: &str, x: i32, y: i32, on: bool);
    fn flush(&mut self);
}
