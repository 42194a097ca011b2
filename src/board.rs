//! GPIO bindings: the five keys (active-low with internal pull-up) and
//! the two indicator LEDs.
//!
//! The keys are plain tactile switches; debouncing happens in software
//! in [`crate::input`], so these inputs are read raw on the sampling
//! cadence with no edge interrupts.

use crate::input::KeyId;
use crate::io::{Led, Leds, PinReader};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{PIN_13, PIN_15, PIN_27, PIN_28, PIN_5, PIN_8, PIN_9};

/// The five key switches. Active-low: pressed pulls the pin to ground.
pub struct KeyPins<'d> {
    brb: Input<'d>,
    mute: Input<'d>,
    ui_left: Input<'d>,
    ui_right: Input<'d>,
    start_stop: Input<'d>,
}

impl KeyPins<'_> {
    pub fn new(
        brb: PIN_8,
        mute: PIN_9,
        ui_left: PIN_13,
        ui_right: PIN_27,
        start_stop: PIN_5,
    ) -> Self {
        Self {
            brb: Input::new(brb, Pull::Up),
            mute: Input::new(mute, Pull::Up),
            ui_left: Input::new(ui_left, Pull::Up),
            ui_right: Input::new(ui_right, Pull::Up),
            start_stop: Input::new(start_stop, Pull::Up),
        }
    }
}

impl PinReader for KeyPins<'_> {
    fn is_pressed(&self, key: KeyId) -> bool {
        match key {
            KeyId::Brb => self.brb.is_low(),
            KeyId::Mute => self.mute.is_low(),
            KeyId::UiLeft => self.ui_left.is_low(),
            KeyId::UiRight => self.ui_right.is_low(),
            KeyId::StartStop => self.start_stop.is_low(),
        }
    }
}

/// Pause (GP28) and mute (GP15) indicator LEDs.
pub struct PadLeds<'d> {
    pause: Output<'d>,
    mute: Output<'d>,
}

impl PadLeds<'_> {
    pub fn new(pause: PIN_28, mute: PIN_15) -> Self {
        Self {
            pause: Output::new(pause, Level::Low),
            mute: Output::new(mute, Level::Low),
        }
    }
}

impl Leds for PadLeds<'_> {
    fn set(&mut self, led: Led, on: bool) {
        let level = if on { Level::High } else { Level::Low };
        match led {
            Led::Pause => self.pause.set_level(level),
            Led::Mute => self.mute.set_level(level),
        }
    }
}
