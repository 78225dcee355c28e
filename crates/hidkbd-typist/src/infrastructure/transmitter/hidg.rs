//! Linux USB gadget HID transmitter.
//!
//! When a board is configured as a USB HID gadget (configfs `functions/hid.*`
//! with the boot keyboard report descriptor), the kernel exposes the function
//! as a character device, usually `/dev/hidg0`.  Every `write` of 8 bytes to
//! that device queues one input report on the interrupt IN endpoint, which the
//! host reads as a keyboard event.
//!
//! # Permissions
//!
//! The device node is normally owned by root.  Either run the typist as root
//! or add a udev rule that grants the running user write access.  A missing
//! node or a permission problem surfaces as [`TransmitError::Io`] from
//! [`HidGadgetTransmitter::open`].

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use hidkbd_core::KEYBOARD_REPORT_SIZE;
use tracing::{info, trace};

use crate::application::report_session::{ReportTransmitter, TransmitError};

/// Device node of the first HID gadget function.
pub const DEFAULT_HIDG_DEVICE: &str = "/dev/hidg0";

/// Writes keyboard reports to a HID gadget character device.
#[derive(Debug)]
pub struct HidGadgetTransmitter {
    path: PathBuf,
    device: File,
}

impl HidGadgetTransmitter {
    /// Opens `path` for writing.
    ///
    /// # Errors
    ///
    /// Returns [`TransmitError::Io`] if the device cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TransmitError> {
        let path = path.into();
        let device = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| TransmitError::Io {
                path: path.clone(),
                source,
            })?;
        info!(device = %path.display(), "opened HID gadget device");
        Ok(Self { path, device })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportTransmitter for HidGadgetTransmitter {
    fn send(&self, report: &[u8; KEYBOARD_REPORT_SIZE]) -> Result<(), TransmitError> {
        // `Write` is implemented for `&File`, so no lock is needed for `&self`.
        (&self.device)
            .write_all(report)
            .map_err(|source| TransmitError::Io {
                path: self.path.clone(),
                source,
            })?;
        trace!(device = %self.path.display(), "report written");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
