//! # hidkbd-core
//!
//! Pure keyboard-emulation logic shared by every front end of hidkbd:
//! the ASCII to USB HID keycode mapper, operation-key request parsing, and the
//! 8-byte boot-protocol keyboard report.
//!
//! This crate performs no I/O.  Sending reports to a host and pacing key
//! presses are the job of `hidkbd-typist`, which drives these types through
//! injected collaborators.
//!
//! # Architecture overview
//!
//! - **`keymap`** – The character mapper.  A US QWERTY character becomes a
//!   [`KeyStroke`]: one HID usage code plus the modifier bits (Shift) needed to
//!   produce it.  The `request` submodule parses caller key strings such as
//!   `"a"` or `"/esc"`.
//!
//! - **`report`** – The boot keyboard report (modifier byte, reserved byte,
//!   six keycode slots), the modifier bit flags, and the HID report descriptor
//!   that announces this report shape to a host.

pub mod keymap;
pub mod report;

pub use keymap::hid::HidKeyCode;
pub use keymap::request::{KeyRequest, KeyRequestError, OperationKey};
pub use keymap::{KeyStroke, KeycodeMapper};
pub use report::{KeyboardReport, ModifierFlags, KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE};
