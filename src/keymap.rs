//! Hotkey actions and their USB HID keyboard chords.
//!
//! Every state transition that reaches the host does so as one fixed
//! chord: press the modifiers plus one function key, then release all.
//! The chord table targets the global-hotkey defaults of common
//! streaming software; Right-Shift + Right-Alt keeps the combinations
//! out of the way of normal typing.
//!
//! Report layout (boot protocol, 8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Modifier bitfield values (byte 0 of the report).
pub mod modifier {
    pub const RIGHT_SHIFT: u8 = 0x20;
    pub const RIGHT_ALT: u8 = 0x40;
}

/// USB HID usage codes for the function keys we chord with.
pub mod usage {
    pub const F1: u8 = 0x3A;
    pub const F2: u8 = 0x3B;
    pub const F9: u8 = 0x42;
    pub const F10: u8 = 0x43;
    pub const F11: u8 = 0x44;
    pub const F12: u8 = 0x45;
}

/// Outbound keystroke actions the pad can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Start the stream.
    Start,
    /// End the stream.
    End,
    /// Enter the be-right-back pause.
    Pause,
    /// Leave the be-right-back pause.
    Resume,
    /// Mute the microphone.
    Mute,
    /// Unmute the microphone.
    Unmute,
}

impl Action {
    /// Lower-case label used in confirmation prompts ("Really start?").
    pub fn label(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::End => "end",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::Mute => "mute",
            Action::Unmute => "unmute",
        }
    }
}

/// One modifier-plus-key combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chord {
    /// Modifier bitfield.
    pub modifier: u8,
    /// USB HID usage code of the non-modifier key.
    pub key: u8,
}

impl Chord {
    /// Report with the chord held down.
    pub const fn press_report(&self) -> KeyboardReport {
        KeyboardReport {
            modifier: self.modifier,
            reserved: 0,
            keycodes: [self.key, 0, 0, 0, 0, 0],
        }
    }
}

/// Fixed action → chord table.
pub const fn chord_for(action: Action) -> Chord {
    const MODS: u8 = modifier::RIGHT_SHIFT | modifier::RIGHT_ALT;
    let key = match action {
        Action::Start => usage::F9,
        Action::End => usage::F10,
        Action::Pause => usage::F1,
        Action::Resume => usage::F2,
        Action::Mute => usage::F11,
        Action::Unmute => usage::F12,
    };
    Chord {
        modifier: MODS,
        key,
    }
}

/// Press-then-release-all report pair for `action`. The two reports
/// travel as a unit: a press that reaches the host without its release
/// leaves the chord held down.
pub const fn chord_sequence(action: Action) -> [KeyboardReport; 2] {
    [chord_for(action).press_report(), KeyboardReport::empty()]
}

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00 per HID spec).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (always 8).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// Returns `true` if no keys are pressed (release event).
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// USB HID Report Descriptor for a standard boot-protocol keyboard.
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant) - padding
    //
    //   - LED output (5 bits + 3 padding) -
    0x05, 0x08, //   Usage Page (LEDs)
    0x19, 0x01, //   Usage Minimum (Num Lock)
    0x29, 0x05, //   Usage Maximum (Kana)
    0x95, 0x05, //   Report Count (5)
    0x75, 0x01, //   Report Size (1)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x03, //   Report Size (3)
    0x91, 0x01, //   Output (Constant) - padding
    //
    //   - Key codes (6 bytes) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0xFF, //   Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];
