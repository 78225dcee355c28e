//! Application layer use cases for the typist.
//!
//! - **`report_session`** – Owns the keyboard report buffer and turns text,
//!   single keys, and modifier chords into press/release report pairs.  The
//!   wire ([`ReportTransmitter`](report_session::ReportTransmitter)) and the
//!   clock ([`KeyDelay`](report_session::KeyDelay)) are injected at
//!   construction time, so this layer never touches a device.

pub mod report_session;
