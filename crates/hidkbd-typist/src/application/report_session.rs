//! ReportSession: turns text and key requests into paced HID report traffic.
//!
//! The session owns the one mutable 8-byte report buffer and drives every key
//! event through the same press/release protocol:
//!
//! ```text
//! send(pressed) → wait(interval) → clear → send(released) → wait(interval)
//! ```
//!
//! Skipping the release makes the host auto-repeat the key; skipping a wait
//! lets the host drop reports.  The actual wire and clock are injected as
//! [`ReportTransmitter`] and [`KeyDelay`] trait objects; their concrete
//! implementations live in the infrastructure layer.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hidkbd_core::{
    HidKeyCode, KeyRequest, KeyRequestError, KeyStroke, KeyboardReport, KeycodeMapper,
    ModifierFlags, KEYBOARD_REPORT_SIZE,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Hold time after each press and each release.
pub const DEFAULT_KEY_INTERVAL: Duration = Duration::from_millis(15);

/// Shortest interval hosts have been observed to register reliably.
///
/// Shorter intervals are accepted (fast hosts may keep up) but logged.
pub const MIN_RELIABLE_KEY_INTERVAL: Duration = Duration::from_millis(15);

/// Error raised by a [`ReportTransmitter`].
#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("I/O error writing report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("device error: {0}")]
    Device(String),
}

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation was attempted before `init()` or after `deinit()`.
    #[error("keyboard session not initialized")]
    Uninitialized,
    /// The key string does not name a single key. Nothing was sent.
    #[error("invalid key request: {0}")]
    InvalidKeyRequest(#[from] KeyRequestError),
    /// A report could not be delivered. The operation was aborted.
    #[error("report transmission failed: {0}")]
    Transmit(#[from] TransmitError),
}

/// Sends one 8-byte keyboard report to the host.
#[cfg_attr(test, mockall::automock)]
pub trait ReportTransmitter: Send + Sync {
    /// Delivers `report` to the host.
    fn send(&self, report: &[u8; KEYBOARD_REPORT_SIZE]) -> Result<(), TransmitError>;
}

/// Blocks the calling thread for at least `duration`.
#[cfg_attr(test, mockall::automock)]
pub trait KeyDelay: Send + Sync {
    fn wait(&self, duration: Duration);
}

/// Tunable session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long each pressed and each released report is held.
    pub key_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_interval: DEFAULT_KEY_INTERVAL,
        }
    }
}

impl SessionConfig {
    pub fn with_key_interval(key_interval: Duration) -> Self {
        Self { key_interval }
    }

    /// Returns `true` if the interval is shorter than [`MIN_RELIABLE_KEY_INTERVAL`].
    pub fn is_below_reliable_minimum(&self) -> bool {
        self.key_interval < MIN_RELIABLE_KEY_INTERVAL
    }
}

/// Lifecycle state of a [`ReportSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
}

/// The keyboard emulation session.
///
/// Created uninitialized; call [`ReportSession::init`] before typing.  Every
/// emulation method takes `&mut self`, so no report can be built while
/// another one is in flight.
pub struct ReportSession {
    transmitter: Arc<dyn ReportTransmitter>,
    delay: Arc<dyn KeyDelay>,
    config: SessionConfig,
    /// `Some` while the session is ready.
    report: Option<KeyboardReport>,
}

impl ReportSession {
    /// Creates an uninitialized session around the given collaborators.
    pub fn new(
        transmitter: Arc<dyn ReportTransmitter>,
        delay: Arc<dyn KeyDelay>,
        config: SessionConfig,
    ) -> Self {
        if config.is_below_reliable_minimum() {
            warn!(
                interval_ms = config.key_interval.as_millis() as u64,
                minimum_ms = MIN_RELIABLE_KEY_INTERVAL.as_millis() as u64,
                "key interval below the reliable minimum; the host may drop keystrokes"
            );
        }
        Self {
            transmitter,
            delay,
            config,
            report: None,
        }
    }

    /// Allocates a zeroed report buffer and marks the session ready.
    ///
    /// Calling `init` on a ready session re-zeroes the buffer.
    pub fn init(&mut self) {
        self.report = Some(KeyboardReport::released());
        info!(
            interval_ms = self.config.key_interval.as_millis() as u64,
            "keyboard session ready"
        );
    }

    /// Releases the report buffer. Later operations fail with
    /// [`SessionError::Uninitialized`] until `init` is called again.
    pub fn deinit(&mut self) {
        if self.report.take().is_some() {
            info!("keyboard session closed");
        }
    }

    pub fn state(&self) -> SessionState {
        if self.report.is_some() {
            SessionState::Ready
        } else {
            SessionState::Uninitialized
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// The current report buffer, or `None` when uninitialized.
    pub fn report(&self) -> Option<&KeyboardReport> {
        self.report.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Types `text` one character at a time.
    ///
    /// Each character gets a full press/release cycle, including characters
    /// with no key mapping, which press an all-zero report so the total typing
    /// time stays proportional to the text length.
    ///
    /// Returns the number of keystrokes performed.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Uninitialized`] if the session is not ready.
    /// - [`SessionError::Transmit`] if a report fails to send; the remaining
    ///   characters are not typed.
    pub fn type_text(&mut self, text: &str) -> Result<usize, SessionError> {
        self.ready_report()?.clear();

        let mut keystrokes = 0;
        for ch in text.chars() {
            self.press_and_release(KeycodeMapper::map(ch))?;
            keystrokes += 1;
        }
        debug!(keystrokes, "text typed");
        Ok(keystrokes)
    }

    /// Presses `key` while holding `modifiers`, e.g. Ctrl+Shift+`/esc`.
    ///
    /// `key` is a single character or one of `/esc`, `/del`, `/tab`.  If the
    /// character itself needs Shift, Shift is added to `modifiers`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Uninitialized`] if the session is not ready.
    /// - [`SessionError::InvalidKeyRequest`] if `key` names no single key or
    ///   names `/space` or `/enter`.  Nothing is sent.
    /// - [`SessionError::Transmit`] if a report fails to send.
    pub fn press_with_modifiers(
        &mut self,
        modifiers: ModifierFlags,
        key: &str,
    ) -> Result<(), SessionError> {
        self.ready_report()?;

        let request = KeyRequest::parse(key).map_err(rejected)?;
        if let KeyRequest::Operation(op) = request {
            if !op.combinable() {
                return Err(rejected(KeyRequestError::NotCombinable(op)));
            }
        }

        let mut stroke = request.stroke();
        stroke.modifiers |= modifiers;
        self.press_and_release(stroke)
    }

    /// Presses a single key: a character or any operation key
    /// (`/esc`, `/del`, `/tab`, `/space`, `/enter`).
    ///
    /// # Errors
    ///
    /// Same as [`ReportSession::press_with_modifiers`], except that every
    /// operation key is accepted.
    pub fn single_keypress(&mut self, key: &str) -> Result<(), SessionError> {
        self.ready_report()?;

        let request = KeyRequest::parse(key).map_err(rejected)?;
        self.press_and_release(request.stroke())
    }

    /// Presses and releases modifier keys on their own, e.g. the GUI key.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidKeyRequest`] with [`KeyRequestError::Empty`] if
    /// `modifiers` is empty, plus the errors of the other operations.
    pub fn tap_modifiers(&mut self, modifiers: ModifierFlags) -> Result<(), SessionError> {
        self.ready_report()?;

        if modifiers.is_empty() {
            return Err(rejected(KeyRequestError::Empty));
        }
        self.press_and_release(KeyStroke::new(modifiers, HidKeyCode::None))
    }

    // ── Press/release protocol ────────────────────────────────────────────────

    fn ready_report(&mut self) -> Result<&mut KeyboardReport, SessionError> {
        self.report.as_mut().ok_or(SessionError::Uninitialized)
    }

    fn press_and_release(&mut self, stroke: KeyStroke) -> Result<(), SessionError> {
        let pressed = {
            let report = self.ready_report()?;
            report.press(stroke);
            report.to_bytes()
        };
        self.transmit(&pressed)?;
        self.delay.wait(self.config.key_interval);

        let released = {
            let report = self.ready_report()?;
            report.clear();
            report.to_bytes()
        };
        self.transmit(&released)?;
        self.delay.wait(self.config.key_interval);
        Ok(())
    }

    /// Sends `bytes`; on failure the buffer is zeroed and the error returned.
    fn transmit(&mut self, bytes: &[u8; KEYBOARD_REPORT_SIZE]) -> Result<(), SessionError> {
        debug!(report = ?bytes, "sending report");
        if let Err(e) = self.transmitter.send(bytes) {
            error!("report transmission failed: {e}");
            if let Some(report) = self.report.as_mut() {
                report.clear();
            }
            return Err(SessionError::Transmit(e));
        }
        Ok(())
    }
}

fn rejected(err: KeyRequestError) -> SessionError {
    warn!("rejected key request: {err}");
    SessionError::InvalidKeyRequest(err)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use hidkbd_core::OperationKey;
    use mockall::predicate::eq;
    use mockall::Sequence;

    const RELEASED: [u8; 8] = [0; 8];

    fn interval() -> Duration {
        DEFAULT_KEY_INTERVAL
    }

    /// A transmitter that must never be called.
    fn silent_transmitter() -> MockReportTransmitter {
        let mut tx = MockReportTransmitter::new();
        tx.expect_send().never();
        tx
    }

    /// A delay that must never be called.
    fn silent_delay() -> MockKeyDelay {
        let mut delay = MockKeyDelay::new();
        delay.expect_wait().never();
        delay
    }

    fn make_session(tx: MockReportTransmitter, delay: MockKeyDelay) -> ReportSession {
        ReportSession::new(Arc::new(tx), Arc::new(delay), SessionConfig::default())
    }

    /// Expects exactly `reports`, in order, each followed by one wait.
    fn expect_reports(reports: &[[u8; 8]]) -> (MockReportTransmitter, MockKeyDelay) {
        let mut tx = MockReportTransmitter::new();
        let mut delay = MockKeyDelay::new();
        let mut seq = Sequence::new();
        for &expected in reports {
            tx.expect_send()
                .withf(move |r| r[..] == expected[..])
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
            delay
                .expect_wait()
                .with(eq(interval()))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }
        (tx, delay)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    #[test]
    fn test_new_session_is_uninitialized() {
        let session = make_session(silent_transmitter(), silent_delay());
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(session.report().is_none());
    }

    #[test]
    fn test_init_allocates_zeroed_report() {
        // Arrange
        let mut session = make_session(silent_transmitter(), silent_delay());

        // Act
        session.init();

        // Assert
        assert!(session.is_ready());
        assert_eq!(session.report(), Some(&KeyboardReport::released()));
    }

    #[test]
    fn test_deinit_returns_to_uninitialized() {
        let mut session = make_session(silent_transmitter(), silent_delay());
        session.init();

        session.deinit();

        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(session.report().is_none());
    }

    #[test]
    fn test_operations_before_init_send_nothing_and_never_wait() {
        // Arrange
        let mut session = make_session(silent_transmitter(), silent_delay());

        // Act / Assert
        assert!(matches!(session.type_text("abc"), Err(SessionError::Uninitialized)));
        assert!(matches!(
            session.press_with_modifiers(ModifierFlags::LEFT_CTRL, "/esc"),
            Err(SessionError::Uninitialized)
        ));
        assert!(matches!(session.single_keypress("/enter"), Err(SessionError::Uninitialized)));
        assert!(matches!(
            session.tap_modifiers(ModifierFlags::OPTION),
            Err(SessionError::Uninitialized)
        ));
    }

    #[test]
    fn test_operations_after_deinit_are_rejected() {
        let mut session = make_session(silent_transmitter(), silent_delay());
        session.init();
        session.deinit();

        assert!(matches!(session.type_text("x"), Err(SessionError::Uninitialized)));
    }

    #[test]
    fn test_uninitialized_takes_precedence_over_invalid_key() {
        let mut session = make_session(silent_transmitter(), silent_delay());
        assert!(matches!(
            session.press_with_modifiers(ModifierFlags::NONE, "ab"),
            Err(SessionError::Uninitialized)
        ));
    }

    // ── type_text ─────────────────────────────────────────────────────────────

    #[test]
    fn test_type_empty_text_sends_nothing() {
        let mut session = make_session(silent_transmitter(), silent_delay());
        session.init();

        assert_eq!(session.type_text("").unwrap(), 0);
    }

    #[test]
    fn test_type_text_interleaves_press_and_release_reports() {
        // Arrange
        let (tx, delay) = expect_reports(&[
            [0x02, 0x00, 0x04, 0, 0, 0, 0, 0],
            RELEASED,
            [0x00, 0x00, 0x05, 0, 0, 0, 0, 0],
            RELEASED,
        ]);
        let mut session = make_session(tx, delay);
        session.init();

        // Act
        let typed = session.type_text("Ab").unwrap();

        // Assert
        assert_eq!(typed, 2);
        assert!(session.report().unwrap().is_released());
    }

    #[test]
    fn test_type_text_presses_unmapped_characters_as_empty_reports() {
        // '\\' is unmapped: it still costs a full press/release cycle.
        let (tx, delay) = expect_reports(&[
            [0x00, 0x00, 0x04, 0, 0, 0, 0, 0],
            RELEASED,
            RELEASED,
            RELEASED,
            [0x00, 0x00, 0x05, 0, 0, 0, 0, 0],
            RELEASED,
        ]);
        let mut session = make_session(tx, delay);
        session.init();

        assert_eq!(session.type_text("a\\b").unwrap(), 3);
    }

    #[test]
    fn test_type_text_aborts_on_transmit_failure() {
        // Arrange: the very first send fails.
        let mut tx = MockReportTransmitter::new();
        tx.expect_send()
            .times(1)
            .returning(|_| Err(TransmitError::Device("endpoint stalled".into())));
        let mut session = make_session(tx, silent_delay());
        session.init();

        // Act
        let result = session.type_text("hello");

        // Assert
        assert!(matches!(result, Err(SessionError::Transmit(_))));
        assert!(session.report().unwrap().is_released(), "buffer must not hold a stale press");
        assert!(session.is_ready());
    }

    #[test]
    fn test_release_failure_is_reported_after_press_wait() {
        let mut tx = MockReportTransmitter::new();
        let mut seq = Sequence::new();
        tx.expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        tx.expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(TransmitError::Device("unplugged".into())));
        let mut delay = MockKeyDelay::new();
        delay.expect_wait().times(1).return_const(());
        let mut session = make_session(tx, delay);
        session.init();

        let result = session.single_keypress("q");

        assert!(matches!(result, Err(SessionError::Transmit(_))));
    }

    // ── press_with_modifiers ──────────────────────────────────────────────────

    #[test]
    fn test_ctrl_shift_escape_sends_one_press_and_one_release() {
        // Arrange
        let (tx, delay) = expect_reports(&[[0x03, 0x00, 0x29, 0, 0, 0, 0, 0], RELEASED]);
        let mut session = make_session(tx, delay);
        session.init();

        // Act
        let result = session.press_with_modifiers(
            ModifierFlags::LEFT_CTRL | ModifierFlags::LEFT_SHIFT,
            "/esc",
        );

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_press_with_modifiers_keeps_shift_of_uppercase_literal() {
        // Ctrl + 'A' must still be shifted: 0x01 | 0x02.
        let (tx, delay) = expect_reports(&[[0x03, 0x00, 0x04, 0, 0, 0, 0, 0], RELEASED]);
        let mut session = make_session(tx, delay);
        session.init();

        session
            .press_with_modifiers(ModifierFlags::LEFT_CTRL, "A")
            .unwrap();
    }

    #[test]
    fn test_press_with_modifiers_rejects_multi_character_literal() {
        // Arrange
        let mut session = make_session(silent_transmitter(), silent_delay());
        session.init();

        // Act
        let result = session.press_with_modifiers(ModifierFlags::NONE, "ab");

        // Assert
        assert!(matches!(
            result,
            Err(SessionError::InvalidKeyRequest(KeyRequestError::MultipleCharacters(_)))
        ));
    }

    #[test]
    fn test_press_with_modifiers_rejects_enter_and_space() {
        let mut session = make_session(silent_transmitter(), silent_delay());
        session.init();

        for (key, op) in [("/enter", OperationKey::Enter), ("/space", OperationKey::Space)] {
            match session.press_with_modifiers(ModifierFlags::LEFT_ALT, key) {
                Err(SessionError::InvalidKeyRequest(KeyRequestError::NotCombinable(got))) => {
                    assert_eq!(got, op)
                }
                other => panic!("{key}: unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn test_press_with_modifiers_rejects_unknown_operation() {
        let mut session = make_session(silent_transmitter(), silent_delay());
        session.init();

        let result = session.press_with_modifiers(ModifierFlags::LEFT_CTRL, "/f4");

        assert!(matches!(
            result,
            Err(SessionError::InvalidKeyRequest(KeyRequestError::UnknownOperation(_)))
        ));
    }

    // ── single_keypress ───────────────────────────────────────────────────────

    #[test]
    fn test_single_keypress_enter() {
        let (tx, delay) = expect_reports(&[[0x00, 0x00, 0x28, 0, 0, 0, 0, 0], RELEASED]);
        let mut session = make_session(tx, delay);
        session.init();

        session.single_keypress("/enter").unwrap();
    }

    #[test]
    fn test_single_keypress_space() {
        let (tx, delay) = expect_reports(&[[0x00, 0x00, 0x2C, 0, 0, 0, 0, 0], RELEASED]);
        let mut session = make_session(tx, delay);
        session.init();

        session.single_keypress("/space").unwrap();
    }

    #[test]
    fn test_single_keypress_uppercase_forces_shift() {
        let (tx, delay) = expect_reports(&[[0x02, 0x00, 0x1D, 0, 0, 0, 0, 0], RELEASED]);
        let mut session = make_session(tx, delay);
        session.init();

        session.single_keypress("Z").unwrap();
    }

    #[test]
    fn test_single_keypress_empty_key_is_rejected() {
        let mut session = make_session(silent_transmitter(), silent_delay());
        session.init();

        assert!(matches!(
            session.single_keypress(""),
            Err(SessionError::InvalidKeyRequest(KeyRequestError::Empty))
        ));
    }

    // ── tap_modifiers ─────────────────────────────────────────────────────────

    #[test]
    fn test_tap_option_sends_modifier_only_report() {
        let (tx, delay) = expect_reports(&[[0x08, 0x00, 0x00, 0, 0, 0, 0, 0], RELEASED]);
        let mut session = make_session(tx, delay);
        session.init();

        session.tap_modifiers(ModifierFlags::OPTION).unwrap();
    }

    #[test]
    fn test_tap_empty_modifiers_is_rejected() {
        let mut session = make_session(silent_transmitter(), silent_delay());
        session.init();

        assert!(matches!(
            session.tap_modifiers(ModifierFlags::NONE),
            Err(SessionError::InvalidKeyRequest(KeyRequestError::Empty))
        ));
    }

    // ── Timing ────────────────────────────────────────────────────────────────

    #[test]
    fn test_custom_interval_is_used_for_both_waits() {
        // Arrange
        let custom = Duration::from_millis(40);
        let mut tx = MockReportTransmitter::new();
        tx.expect_send().times(2).returning(|_| Ok(()));
        let mut delay = MockKeyDelay::new();
        delay.expect_wait().with(eq(custom)).times(2).return_const(());
        let mut session = ReportSession::new(
            Arc::new(tx),
            Arc::new(delay),
            SessionConfig::with_key_interval(custom),
        );
        session.init();

        // Act / Assert
        session.single_keypress("x").unwrap();
        assert_eq!(session.config().key_interval, custom);
    }

    #[test]
    fn test_default_config_interval_is_15ms() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.key_interval, Duration::from_millis(15));
        assert!(!cfg.is_below_reliable_minimum());
        assert!(SessionConfig::with_key_interval(Duration::from_millis(5)).is_below_reliable_minimum());
    }
}
