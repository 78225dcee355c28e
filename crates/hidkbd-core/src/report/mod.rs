//! USB HID keyboard report (boot protocol).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield, see ModifierFlags)
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```
//!
//! hidkbd only ever fills the first keycode slot.  A report on the wire is
//! therefore either a *pressed* report (modifier and/or slot 1 set) or the
//! all-zero *released* report.

mod descriptor;
mod modifier;

pub use descriptor::KEYBOARD_REPORT_DESCRIPTOR;
pub use modifier::ModifierFlags;

use crate::keymap::KeyStroke;

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: ModifierFlags,
    /// Reserved byte (always 0x00 in the boot protocol).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Creates an all-keys-released report.
    pub const fn released() -> Self {
        Self {
            modifier: ModifierFlags::NONE,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// Loads `stroke` into the report, replacing whatever was pressed before.
    ///
    /// Only the modifier byte and the first keycode slot are written; the
    /// other slots are zeroed.
    pub fn press(&mut self, stroke: KeyStroke) {
        *self = Self::released();
        self.modifier = stroke.modifiers;
        self.keycodes[0] = stroke.key.as_u8();
    }

    /// Zeroes every byte of the report.
    pub fn clear(&mut self) {
        *self = Self::released();
    }

    /// Returns `true` if no keys or modifiers are pressed.
    pub fn is_released(&self) -> bool {
        self.modifier.is_empty() && self.keycodes.iter().all(|&k| k == 0)
    }

    /// Serialises the report into its 8-byte wire form.
    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
        buf[0] = self.modifier.bits();
        buf[1] = self.reserved;
        buf[2..].copy_from_slice(&self.keycodes);
        buf
    }

    /// Parses a report from its wire form.
    ///
    /// Returns `None` if `data` is shorter than [`KEYBOARD_REPORT_SIZE`].
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < KEYBOARD_REPORT_SIZE {
            return None;
        }
        Some(Self {
            modifier: ModifierFlags(data[0]),
            reserved: data[1],
            keycodes: [data[2], data[3], data[4], data[5], data[6], data[7]],
        })
    }
}
