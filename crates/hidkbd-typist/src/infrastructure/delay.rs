//! Key delay implementations.
//!
//! [`ThreadSleepDelay`] is the production clock: it blocks the calling thread,
//! which is exactly the pacing model of a report session (one key event at a
//! time, no cancellation).  [`RecordingDelay`] records the requested durations
//! and returns immediately so tests and dry runs finish instantly.

use std::sync::Mutex;
use std::time::Duration;

use crate::application::report_session::KeyDelay;

/// Blocks with [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleepDelay;

impl KeyDelay for ThreadSleepDelay {
    fn wait(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records every requested wait without sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded durations.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }

    /// Sum of all recorded waits: the time a real run would have blocked.
    pub fn total(&self) -> Duration {
        self.waits.lock().unwrap().iter().sum()
    }
}

impl KeyDelay for RecordingDelay {
    fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}
