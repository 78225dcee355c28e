//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page) emitted by hidkbd.
//!
//! Only the usages a US QWERTY typist needs are listed: letters, the digit
//! row, the operation keys (Enter, Escape, Backspace, Tab, Space) and the
//! punctuation keys between Minus and Slash.
//!
//! Reference: USB HID Usage Tables 1.12, Section 10 (Keyboard/Keypad page 0x07).
//!
//! # Usage IDs are key positions
//!
//! HID usage codes name **physical keys**, not characters.  Letter A is 0x04
//! whether the host turns it into `a` or `A`; the Shift bit in the report's
//! modifier byte decides which.  That is why the letters start at 0x04 rather
//! than at ASCII 0x41, and why `!` and `1` share usage 0x1E.
//!
//! # The `None` usage
//!
//! Usage 0x00 means "no event" in the keycode array of a boot report.
//! [`HidKeyCode::None`] is what the mapper returns for a character it cannot
//! type, so a report built from it presses nothing.

use serde::{Deserialize, Serialize};

/// USB HID Usage ID for keyboard keys (page 0x07).
///
/// The numeric value of each variant is the byte written into a report's
/// keycode slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum HidKeyCode {
    /// No key pressed.
    #[default]
    None = 0x00,

    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digit row (HID 0x1E–0x27); 0 comes after 9 as on the keyboard
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Operation keys (HID 0x28–0x2C)
    Enter = 0x28,
    Escape = 0x29,
    /// "Keyboard DELETE (Backspace)" in the usage tables.
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,

    // Punctuation (HID 0x2D–0x38)
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,
}

/// Letter usages in alphabetical order, indexed by `letter - 'a'`.
const LETTERS: [HidKeyCode; 26] = [
    HidKeyCode::KeyA,
    HidKeyCode::KeyB,
    HidKeyCode::KeyC,
    HidKeyCode::KeyD,
    HidKeyCode::KeyE,
    HidKeyCode::KeyF,
    HidKeyCode::KeyG,
    HidKeyCode::KeyH,
    HidKeyCode::KeyI,
    HidKeyCode::KeyJ,
    HidKeyCode::KeyK,
    HidKeyCode::KeyL,
    HidKeyCode::KeyM,
    HidKeyCode::KeyN,
    HidKeyCode::KeyO,
    HidKeyCode::KeyP,
    HidKeyCode::KeyQ,
    HidKeyCode::KeyR,
    HidKeyCode::KeyS,
    HidKeyCode::KeyT,
    HidKeyCode::KeyU,
    HidKeyCode::KeyV,
    HidKeyCode::KeyW,
    HidKeyCode::KeyX,
    HidKeyCode::KeyY,
    HidKeyCode::KeyZ,
];

/// Digit-row usages in keyboard order (1..9, then 0).
const DIGIT_ROW: [HidKeyCode; 10] = [
    HidKeyCode::Digit1,
    HidKeyCode::Digit2,
    HidKeyCode::Digit3,
    HidKeyCode::Digit4,
    HidKeyCode::Digit5,
    HidKeyCode::Digit6,
    HidKeyCode::Digit7,
    HidKeyCode::Digit8,
    HidKeyCode::Digit9,
    HidKeyCode::Digit0,
];

impl HidKeyCode {
    /// Converts a raw HID Usage ID to a [`HidKeyCode`].
    ///
    /// Returns [`HidKeyCode::None`] if the value is not one of the usages
    /// listed in this module.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x04..=0x1D => LETTERS[usize::from(value - 0x04)],
            0x1E..=0x27 => DIGIT_ROW[usize::from(value - 0x1E)],
            0x28 => HidKeyCode::Enter,
            0x29 => HidKeyCode::Escape,
            0x2A => HidKeyCode::Backspace,
            0x2B => HidKeyCode::Tab,
            0x2C => HidKeyCode::Space,
            0x2D => HidKeyCode::Minus,
            0x2E => HidKeyCode::Equal,
            0x2F => HidKeyCode::BracketLeft,
            0x30 => HidKeyCode::BracketRight,
            0x31 => HidKeyCode::Backslash,
            0x33 => HidKeyCode::Semicolon,
            0x34 => HidKeyCode::Quote,
            0x35 => HidKeyCode::Backquote,
            0x36 => HidKeyCode::Comma,
            0x37 => HidKeyCode::Period,
            0x38 => HidKeyCode::Slash,
            _ => HidKeyCode::None,
        }
    }

    /// Returns the raw USB HID Usage ID value for this key code.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns `true` for the "no key" usage.
    pub fn is_none(self) -> bool {
        self == HidKeyCode::None
    }
}
