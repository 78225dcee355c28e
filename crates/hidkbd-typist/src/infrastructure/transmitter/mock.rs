//! Recording report transmitter for tests and dry runs.
//!
//! Each report passed to `send` is pushed into a `Mutex<Vec<...>>` so test
//! assertions can inspect exactly what would have reached the host, and in
//! what order.  The `hidkbd --dry-run` mode uses the same recorder and prints
//! its contents instead of opening a device.
//!
//! # Usage in tests
//!
//! ```ignore
//! let tx = Arc::new(RecordingTransmitter::new());
//! let mut session = ReportSession::new(tx.clone(), delay, SessionConfig::default());
//! session.init();
//! session.type_text("a")?;
//! assert_eq!(tx.reports().len(), 2);
//! ```
//!
//! # Failure injection
//!
//! Set `should_fail` to make every call fail, or use
//! [`RecordingTransmitter::failing_after`] to let the first `n` reports
//! through and fail the rest.

use std::sync::Mutex;

use hidkbd_core::{KeyboardReport, KEYBOARD_REPORT_SIZE};

use crate::application::report_session::{ReportTransmitter, TransmitError};

/// A transmitter that records reports without touching any device.
#[derive(Default)]
pub struct RecordingTransmitter {
    /// Every report successfully "sent", in order.
    pub sent: Mutex<Vec<[u8; KEYBOARD_REPORT_SIZE]>>,
    /// When `true`, every call returns [`TransmitError::Device`].
    pub should_fail: bool,
    /// When `Some(n)`, calls after the first `n` successful ones fail.
    pub fail_after: Option<usize>,
}

impl RecordingTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that accepts `n` reports and fails from then on.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    /// Snapshot of the recorded reports.
    pub fn reports(&self) -> Vec<[u8; KEYBOARD_REPORT_SIZE]> {
        self.sent.lock().unwrap().clone()
    }

    /// Recorded reports parsed back into [`KeyboardReport`]s.
    pub fn parsed_reports(&self) -> Vec<KeyboardReport> {
        self.reports()
            .iter()
            .filter_map(|bytes| KeyboardReport::from_bytes(bytes))
            .collect()
    }
}

impl ReportTransmitter for RecordingTransmitter {
    /// Records the report, or returns an error if failure injection applies.
    fn send(&self, report: &[u8; KEYBOARD_REPORT_SIZE]) -> Result<(), TransmitError> {
        if self.should_fail {
            return Err(TransmitError::Device("mock failure".into()));
        }
        let mut sent = self.sent.lock().unwrap();
        if self.fail_after.is_some_and(|n| sent.len() >= n) {
            return Err(TransmitError::Device("mock failure".into()));
        }
        sent.push(*report);
        Ok(())
    }
}
