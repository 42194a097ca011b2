//! Key sampling and software debounce.
//!
//! Five keys, polled on a fixed 50 ms cadence. A key fires exactly one
//! `KeyPressed` per physical press: the held flag - not edge counting -
//! gates emission, so contact bounce inside the window is invisible and
//! a stuck-low key simply never re-fires.

use crate::event::{Event, EventQueue};
use crate::io::PinReader;

/// Number of physical keys on the pad.
pub const KEY_COUNT: usize = 5;

/// Identity of each physical key. The pin mapping lives in `config`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyId {
    /// Toggle the be-right-back pause.
    Brb,
    /// Toggle the microphone mute.
    Mute,
    /// Left soft button (cancel while confirming).
    UiLeft,
    /// Right soft button (confirm while confirming).
    UiRight,
    /// Start or stop the stream.
    StartStop,
}

impl KeyId {
    pub const ALL: [KeyId; KEY_COUNT] = [
        KeyId::Brb,
        KeyId::Mute,
        KeyId::UiLeft,
        KeyId::UiRight,
        KeyId::StartStop,
    ];
}

/// Debounced sampler state: one held flag per key.
pub struct Sampler {
    held: [bool; KEY_COUNT],
}

impl Sampler {
    pub const fn new() -> Self {
        Self {
            held: [false; KEY_COUNT],
        }
    }

    /// Read every key once and emit edges into the queue.
    ///
    /// Call on the sampling cadence; no error conditions exist here. A
    /// dropped event on a full queue means the dispatcher stalled,
    /// which the held flag tolerates (the press is simply lost).
    pub fn sample<P: PinReader>(&mut self, pins: &P, queue: &mut EventQueue) {
        for key in KeyId::ALL {
            let idx = key as usize;
            if pins.is_pressed(key) {
                if !self.held[idx] {
                    self.held[idx] = true;
                    let _ = queue.push(Event::KeyPressed(key));
                }
            } else {
                self.held[idx] = false;
            }
        }
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePins {
        pressed: [bool; KEY_COUNT],
    }

    impl PinReader for FakePins {
        fn is_pressed(&self, key: KeyId) -> bool {
            self.pressed[key as usize]
        }
    }

    fn drain(queue: &mut EventQueue) -> heapless::Vec<Event, 16> {
        let mut out = heapless::Vec::new();
        while let Some(event) = queue.pop() {
            out.push(event).unwrap();
        }
        out
    }

    #[test]
    fn one_event_per_press() {
        let mut sampler = Sampler::new();
        let mut queue = EventQueue::new();
        let mut pins = FakePins {
            pressed: [false; KEY_COUNT],
        };

        pins.pressed[KeyId::Mute as usize] = true;
        sampler.sample(&pins, &mut queue);
        assert_eq!(drain(&mut queue).as_slice(), [Event::KeyPressed(KeyId::Mute)]);

        // Still held across later samples: no repeat.
        sampler.sample(&pins, &mut queue);
        sampler.sample(&pins, &mut queue);
        assert!(queue.is_empty());
    }

    #[test]
    fn release_rearms_without_event() {
        let mut sampler = Sampler::new();
        let mut queue = EventQueue::new();
        let mut pins = FakePins {
            pressed: [false; KEY_COUNT],
        };

        pins.pressed[KeyId::Brb as usize] = true;
        sampler.sample(&pins, &mut queue);
        pins.pressed[KeyId::Brb as usize] = false;
        sampler.sample(&pins, &mut queue);
        assert_eq!(drain(&mut queue).len(), 1);

        // Second physical press fires again.
        pins.pressed[KeyId::Brb as usize] = true;
        sampler.sample(&pins, &mut queue);
        assert_eq!(drain(&mut queue).as_slice(), [Event::KeyPressed(KeyId::Brb)]);
    }

    #[test]
    fn bounce_within_window_is_invisible() {
        // The sampler only sees the pin at sample instants; anything
        // that settles back to "pressed" between samples looks held.
        let mut sampler = Sampler::new();
        let mut queue = EventQueue::new();
        let mut pins = FakePins {
            pressed: [false; KEY_COUNT],
        };

        for _ in 0..3 {
            pins.pressed[KeyId::StartStop as usize] = true;
            sampler.sample(&pins, &mut queue);
        }
        assert_eq!(drain(&mut queue).len(), 1);
    }

    #[test]
    fn independent_keys_fire_independently() {
        let mut sampler = Sampler::new();
        let mut queue = EventQueue::new();
        let pins = FakePins {
            pressed: [true; KEY_COUNT],
        };

        sampler.sample(&pins, &mut queue);
        assert_eq!(drain(&mut queue).len(), KEY_COUNT);
    }
}
