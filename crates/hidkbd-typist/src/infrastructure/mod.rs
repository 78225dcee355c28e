//! Infrastructure layer for the typist.
//!
//! Contains OS-facing adapters for the collaborator traits declared in
//! `application::report_session`, plus configuration persistence.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `hidkbd_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`transmitter`** – [`ReportTransmitter`](crate::application::report_session::ReportTransmitter)
//!   implementations: the Linux HID gadget device writer and a recording mock.
//!
//! - **`delay`** – [`KeyDelay`](crate::application::report_session::KeyDelay)
//!   implementations: a thread-sleep delay and a recording mock.
//!
//! - **`storage`** – TOML configuration file.

pub mod delay;
pub mod storage;
pub mod transmitter;
