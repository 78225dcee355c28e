//! Character to HID keycode mapping for a US QWERTY keyboard.
//!
//! The canonical output is a [`KeyStroke`]: one HID Usage ID plus the modifier
//! bits a typist would hold to produce the character.
//!
//! # How characters become key positions
//!
//! Letters and the digits 1-9 sit in contiguous runs in both ASCII and the HID
//! usage table, so they are mapped with a fixed offset:
//!
//! | Characters | ASCII       | HID usage   | Modifier   |
//! |------------|-------------|-------------|------------|
//! | `A`-`Z`    | 0x41-0x5A   | 0x04-0x1D   | Left Shift |
//! | `a`-`z`    | 0x61-0x7A   | 0x04-0x1D   | none       |
//! | `1`-`9`    | 0x31-0x39   | 0x1E-0x26   | none       |
//! | `0`        | 0x30        | 0x27        | none       |
//!
//! `0` is the exception: the keyboard's digit row ends with 0 after 9, while
//! ASCII puts it first.
//!
//! Punctuation is table driven.  A shifted symbol uses the usage of the key it
//! is printed on (`!` is Shift+1, `_` is Shift+`-`), so the pair shares one
//! keycode and differs only in the Shift bit.
//!
//! Anything else, including control characters and non-ASCII text, maps to
//! [`KeyStroke::NONE`]: a press of nothing rather than an error.

pub mod hid;
pub mod request;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::report::ModifierFlags;
use hid::HidKeyCode;

/// One key press as it appears in a report: modifier bits plus a single usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyStroke {
    pub modifiers: ModifierFlags,
    pub key: HidKeyCode,
}

impl KeyStroke {
    /// A press of nothing: no modifiers, usage 0x00.
    pub const NONE: KeyStroke = KeyStroke {
        modifiers: ModifierFlags::NONE,
        key: HidKeyCode::None,
    };

    pub const fn new(modifiers: ModifierFlags, key: HidKeyCode) -> Self {
        Self { modifiers, key }
    }

    /// A stroke with no modifier bits.
    pub const fn plain(key: HidKeyCode) -> Self {
        Self::new(ModifierFlags::NONE, key)
    }

    /// A stroke with Left Shift held.
    pub const fn shifted(key: HidKeyCode) -> Self {
        Self::new(ModifierFlags::LEFT_SHIFT, key)
    }

    /// Returns `true` for [`KeyStroke::NONE`].
    pub fn is_none(&self) -> bool {
        self.modifiers.is_empty() && self.key.is_none()
    }
}

/// Unshifted punctuation reachable with a single key.
const UNSHIFTED_SYMBOLS: &[(char, HidKeyCode)] = &[
    (' ', HidKeyCode::Space),
    ('/', HidKeyCode::Slash),
    ('-', HidKeyCode::Minus),
    ('=', HidKeyCode::Equal),
    ('[', HidKeyCode::BracketLeft),
    (']', HidKeyCode::BracketRight),
    (';', HidKeyCode::Semicolon),
    (',', HidKeyCode::Comma),
    ('.', HidKeyCode::Period),
];

/// Symbols typed with Left Shift, paired with the key they are printed on.
const SHIFTED_SYMBOLS: &[(char, HidKeyCode)] = &[
    ('!', HidKeyCode::Digit1),
    ('@', HidKeyCode::Digit2),
    ('#', HidKeyCode::Digit3),
    ('$', HidKeyCode::Digit4),
    ('%', HidKeyCode::Digit5),
    ('^', HidKeyCode::Digit6),
    ('&', HidKeyCode::Digit7),
    ('*', HidKeyCode::Digit8),
    ('(', HidKeyCode::Digit9),
    (')', HidKeyCode::Digit0),
    ('_', HidKeyCode::Minus),
    ('+', HidKeyCode::Equal),
    (':', HidKeyCode::Semicolon),
    ('<', HidKeyCode::Comma),
    ('>', HidKeyCode::Period),
    ('?', HidKeyCode::Slash),
];

fn lookup(table: &[(char, HidKeyCode)], ch: char) -> Option<HidKeyCode> {
    table.iter().find(|(c, _)| *c == ch).map(|&(_, key)| key)
}

/// Stateless US QWERTY character mapper.
pub struct KeycodeMapper;

impl KeycodeMapper {
    /// Maps a character to the key stroke that types it.
    ///
    /// Total over `char`: unmapped characters return [`KeyStroke::NONE`].
    pub fn map(ch: char) -> KeyStroke {
        let stroke = match ch {
            // 0x41-0x5A -> 0x04-0x1D (offset 0x3D)
            'A'..='Z' => KeyStroke::shifted(HidKeyCode::from_u8(ch as u8 - 0x3D)),
            // 0x61-0x7A -> 0x04-0x1D (offset 0x5D)
            'a'..='z' => KeyStroke::plain(HidKeyCode::from_u8(ch as u8 - 0x5D)),
            // 0x31-0x39 -> 0x1E-0x26 (offset 0x13)
            '1'..='9' => KeyStroke::plain(HidKeyCode::from_u8(ch as u8 - 0x13)),
            '0' => KeyStroke::plain(HidKeyCode::Digit0),
            _ => {
                if let Some(key) = lookup(UNSHIFTED_SYMBOLS, ch) {
                    KeyStroke::plain(key)
                } else if let Some(key) = lookup(SHIFTED_SYMBOLS, ch) {
                    KeyStroke::shifted(key)
                } else {
                    KeyStroke::NONE
                }
            }
        };

        if stroke.is_none() {
            trace!(character = ?ch, "no key mapping; emitting empty stroke");
        }
        stroke
    }

    /// Returns `true` if [`KeycodeMapper::map`] produces a real key for `ch`.
    pub fn is_mapped(ch: char) -> bool {
        !Self::map(ch).is_none()
    }
}
