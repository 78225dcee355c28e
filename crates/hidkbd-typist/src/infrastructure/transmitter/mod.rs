//! Report transmitter implementations.
//!
//! [`hidg::HidGadgetTransmitter`] writes to a Linux USB gadget HID device; the
//! device node is a plain character file, so the adapter compiles everywhere
//! and only fails at open time on systems without one.

pub mod hidg;
pub mod mock;

pub use hidg::HidGadgetTransmitter;
pub use mock::RecordingTransmitter;
