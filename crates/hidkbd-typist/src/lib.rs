//! hidkbd-typist library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the typist do?
//!
//! A Linux board with a USB device controller (a Raspberry Pi Zero, for
//! example) can present itself to another computer as a keyboard through the
//! USB gadget framework.  The typist is the software half of that keyboard:
//!
//! 1. Loads its configuration (gadget device path, key interval, log level).
//! 2. Opens a [`ReportSession`](application::report_session::ReportSession)
//!    around a report transmitter and a delay.
//! 3. Maps every character or named key to a HID keycode with
//!    `hidkbd_core::KeycodeMapper`.
//! 4. Writes a pressed report, waits, writes a released report, waits, and
//!    moves on to the next key.

/// Application layer: the report session and its collaborator traits.
pub mod application;

/// Infrastructure layer: device transmitter, delays, mocks, and config storage.
pub mod infrastructure;
