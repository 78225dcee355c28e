//! Parsing of caller key strings into key requests.
//!
//! A key string is either a single literal character (`"a"`, `"?"`, `"/"`) or
//! an operation-key name introduced by a slash (`"/esc"`, `"/enter"`).
//! Anything else is rejected so that a string such as `"ab"` is never typed
//! as a truncated single character.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hid::HidKeyCode;
use super::{KeyStroke, KeycodeMapper};

/// Prefix that marks an operation-key name.
pub const OPERATION_PREFIX: char = '/';

/// Error returned for a key string that names no single key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyRequestError {
    #[error("empty key request")]
    Empty,
    #[error("key request {0:?} contains more than one character")]
    MultipleCharacters(String),
    #[error("unknown operation key {0:?}")]
    UnknownOperation(String),
    #[error("operation key {0} cannot be combined with modifiers")]
    NotCombinable(OperationKey),
}

/// Named non-printing keys addressable as `/name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKey {
    Escape,
    /// The key labelled Delete/Backspace (usage 0x2A).
    Delete,
    Tab,
    Space,
    Enter,
}

impl OperationKey {
    pub const ALL: [OperationKey; 5] = [
        OperationKey::Escape,
        OperationKey::Delete,
        OperationKey::Tab,
        OperationKey::Space,
        OperationKey::Enter,
    ];

    /// Looks up an operation key by its name without the leading slash.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// The name used after the slash, e.g. `"esc"`.
    pub fn name(self) -> &'static str {
        match self {
            OperationKey::Escape => "esc",
            OperationKey::Delete => "del",
            OperationKey::Tab => "tab",
            OperationKey::Space => "space",
            OperationKey::Enter => "enter",
        }
    }

    pub fn key_code(self) -> HidKeyCode {
        match self {
            OperationKey::Escape => HidKeyCode::Escape,
            OperationKey::Delete => HidKeyCode::Backspace,
            OperationKey::Tab => HidKeyCode::Tab,
            OperationKey::Space => HidKeyCode::Space,
            OperationKey::Enter => HidKeyCode::Enter,
        }
    }

    /// Whether the key may be pressed together with caller-chosen modifiers.
    ///
    /// Only Escape, Delete and Tab take part in modifier chords
    /// (Ctrl+Shift+Esc, Ctrl+Alt+Del, Alt+Tab).
    pub fn combinable(self) -> bool {
        matches!(
            self,
            OperationKey::Escape | OperationKey::Delete | OperationKey::Tab
        )
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{OPERATION_PREFIX}{}", self.name())
    }
}

/// A single key the caller asked to press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRequest {
    Literal(char),
    Operation(OperationKey),
}

impl KeyRequest {
    /// Parses a caller key string.
    ///
    /// # Errors
    ///
    /// - [`KeyRequestError::Empty`] for `""`.
    /// - [`KeyRequestError::UnknownOperation`] for `/name` with an unknown name.
    /// - [`KeyRequestError::MultipleCharacters`] for any other string longer
    ///   than one character.
    pub fn parse(key: &str) -> Result<Self, KeyRequestError> {
        let mut chars = key.chars();
        let first = chars.next().ok_or(KeyRequestError::Empty)?;
        let rest = chars.as_str();

        if rest.is_empty() {
            return Ok(KeyRequest::Literal(first));
        }
        if first == OPERATION_PREFIX {
            return OperationKey::from_name(rest)
                .map(KeyRequest::Operation)
                .ok_or_else(|| KeyRequestError::UnknownOperation(key.to_string()));
        }
        Err(KeyRequestError::MultipleCharacters(key.to_string()))
    }

    /// Resolves the request to the stroke it presses.
    ///
    /// Literals go through [`KeycodeMapper`], so `Literal('A')` carries Shift.
    pub fn stroke(self) -> KeyStroke {
        match self {
            KeyRequest::Literal(ch) => KeycodeMapper::map(ch),
            KeyRequest::Operation(op) => KeyStroke::plain(op.key_code()),
        }
    }
}
