//! Modifier byte of the boot keyboard report.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Bit flags for byte 0 of a boot keyboard report.
///
/// Combine flags with `|`:
///
/// ```rust
/// use hidkbd_core::ModifierFlags;
///
/// let chord = ModifierFlags::LEFT_CTRL | ModifierFlags::LEFT_SHIFT;
/// assert_eq!(chord.bits(), 0b0000_0011);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierFlags(pub u8);

impl ModifierFlags {
    pub const NONE: ModifierFlags = ModifierFlags(0);
    pub const LEFT_CTRL: ModifierFlags = ModifierFlags(1 << 0);
    pub const LEFT_SHIFT: ModifierFlags = ModifierFlags(1 << 1);
    pub const LEFT_ALT: ModifierFlags = ModifierFlags(1 << 2);
    /// Left GUI: the Windows key on PCs, Command on macOS.
    pub const LEFT_GUI: ModifierFlags = ModifierFlags(1 << 3);
    pub const RIGHT_CTRL: ModifierFlags = ModifierFlags(1 << 4);
    pub const RIGHT_SHIFT: ModifierFlags = ModifierFlags(1 << 5);
    pub const RIGHT_ALT: ModifierFlags = ModifierFlags(1 << 6);
    pub const RIGHT_GUI: ModifierFlags = ModifierFlags(1 << 7);

    /// Alias of [`ModifierFlags::LEFT_GUI`] under its platform-neutral name.
    pub const OPTION: ModifierFlags = ModifierFlags::LEFT_GUI;

    /// Returns the raw modifier byte.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if no modifier is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every bit of `other` is also set in `self`.
    pub fn contains(self, other: ModifierFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if either Shift modifier is active.
    pub fn shift(self) -> bool {
        self.0 & (Self::LEFT_SHIFT.0 | Self::RIGHT_SHIFT.0) != 0
    }
}

impl BitOr for ModifierFlags {
    type Output = ModifierFlags;

    fn bitor(self, rhs: ModifierFlags) -> ModifierFlags {
        ModifierFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ModifierFlags {
    fn bitor_assign(&mut self, rhs: ModifierFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(ModifierFlags, &str); 8] = [
            (ModifierFlags::LEFT_CTRL, "LCtrl"),
            (ModifierFlags::LEFT_SHIFT, "LShift"),
            (ModifierFlags::LEFT_ALT, "LAlt"),
            (ModifierFlags::LEFT_GUI, "LGui"),
            (ModifierFlags::RIGHT_CTRL, "RCtrl"),
            (ModifierFlags::RIGHT_SHIFT, "RShift"),
            (ModifierFlags::RIGHT_ALT, "RAlt"),
            (ModifierFlags::RIGHT_GUI, "RGui"),
        ];

        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
