//! Integration tests for the public mapping surface of hidkbd-core.
//!
//! These tests go through the crate root re-exports and check the properties
//! a host relies on: letter/digit ranges, symbol pairs sharing a key, and the
//! exact bytes of the reports built from them.

use hidkbd_core::{
    HidKeyCode, KeyRequest, KeyRequestError, KeyStroke, KeyboardReport, KeycodeMapper,
    ModifierFlags, OperationKey,
};

/// Builds the wire form of the press report for `ch`.
fn press_bytes(ch: char) -> [u8; 8] {
    let mut report = KeyboardReport::released();
    report.press(KeycodeMapper::map(ch));
    report.to_bytes()
}

#[test]
fn test_uppercase_a_press_report_bytes() {
    assert_eq!(press_bytes('A'), [0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn test_lowercase_b_press_report_bytes() {
    assert_eq!(press_bytes('b'), [0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn test_symbol_pairs_differ_only_in_shift() {
    assert_eq!(KeycodeMapper::map('-'), KeyStroke::plain(HidKeyCode::Minus));
    assert_eq!(KeycodeMapper::map('_'), KeyStroke::shifted(HidKeyCode::Minus));
    assert_eq!(KeycodeMapper::map(';'), KeyStroke::plain(HidKeyCode::Semicolon));
    assert_eq!(KeycodeMapper::map(':'), KeyStroke::shifted(HidKeyCode::Semicolon));
    assert_eq!(press_bytes('_')[2], 0x2D);
    assert_eq!(press_bytes(':')[2], 0x33);
}

#[test]
fn test_digit_zero_maps_after_nine() {
    assert_eq!(press_bytes('9')[2], 0x26);
    assert_eq!(press_bytes('0')[2], 0x27);
    assert_eq!(press_bytes('0')[0], 0x00);
}

#[test]
fn test_unmapped_character_press_is_all_zero() {
    for ch in ['\\', '"', '{', '}', '\u{7}'] {
        assert_eq!(press_bytes(ch), [0; 8], "{ch:?} must press nothing");
    }
}

#[test]
fn test_count_of_mapped_ascii_characters() {
    // 26 + 26 letters, 10 digits, 9 unshifted and 16 shifted symbols.
    let mapped = (0u8..=0x7F)
        .filter(|&b| KeycodeMapper::is_mapped(char::from(b)))
        .count();
    assert_eq!(mapped, 26 + 26 + 10 + 9 + 16);
}

#[test]
fn test_operation_request_round_trip_through_report() {
    // Arrange
    let request = KeyRequest::parse("/esc").expect("known operation key");
    let mut stroke = request.stroke();
    stroke.modifiers |= ModifierFlags::LEFT_CTRL | ModifierFlags::LEFT_SHIFT;

    // Act
    let mut report = KeyboardReport::released();
    report.press(stroke);

    // Assert
    assert_eq!(request, KeyRequest::Operation(OperationKey::Escape));
    assert_eq!(report.to_bytes(), [0x03, 0x00, 0x29, 0, 0, 0, 0, 0]);
}

#[test]
fn test_rejected_requests_carry_the_offending_text() {
    match KeyRequest::parse("hello") {
        Err(KeyRequestError::MultipleCharacters(text)) => assert_eq!(text, "hello"),
        other => panic!("unexpected parse result: {other:?}"),
    }
}
