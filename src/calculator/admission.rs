//! Per-keystroke admission rules.
//!
//! Decides whether a tapped key is appended to the input buffer, replaces it,
//! or is dropped. Commit (`=`) is not handled here.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::CalcError;
use super::key::{Key, is_operator_glyph};

lazy_static! {
    /// The numeric token at the end of the buffer: everything after the last
    /// operator, parenthesis, root or percent sign.
    static ref TRAILING_NUMBER: Regex = Regex::new(r"[0-9.]*$").unwrap();
}

/// The editable state behind the display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    /// Expression typed so far, in display glyphs.
    pub buffer: String,
    /// Set when `buffer` holds a freshly computed result rather than typed input.
    pub showing_result: bool,
}

impl InputState {
    /// Empty the buffer and drop the result flag.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.showing_result = false;
    }

    /// Replace the buffer with a computed result.
    pub fn show_result(&mut self, text: String) {
        self.buffer = text;
        self.showing_result = true;
    }

    fn replace_with(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
        self.showing_result = false;
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }
}

/// What admission did with a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Appended,
    /// The buffer was replaced by the key (fresh input after a result, or a
    /// leading zero overwritten).
    Replaced,
    Cleared,
    Removed,
    /// The key was dropped without changing the buffer.
    Ignored,
}

/// Apply one key to the input state.
///
/// Only [`CalcError::InputTooLong`] is reported as an error; every other
/// rejection is a silent no-op returning [`Admission::Ignored`].
pub fn admit_key(state: &mut InputState, key: Key, max_len: usize) -> Result<Admission, CalcError> {
    let digit = match key {
        Key::Clear => {
            state.clear();
            return Ok(Admission::Cleared);
        }
        Key::Backspace => return Ok(backspace(state)),
        Key::Equals => return Ok(Admission::Ignored),
        Key::Digit(_) => key.text(),
        _ => None,
    };

    // Start fresh after a result.
    if state.showing_result
        && let Some(digit) = digit
    {
        state.replace_with(digit);
        return Ok(Admission::Replaced);
    }

    if state.buffer == "0"
        && let Some(digit) = digit
    {
        if digit == "0" {
            return Ok(Admission::Ignored);
        }
        state.replace_with(digit);
        return Ok(Admission::Replaced);
    }

    let Some(text) = key.text() else {
        return Ok(Admission::Ignored);
    };

    match key {
        Key::Operator(_) if ends_with_operator(&state.buffer) => return Ok(Admission::Ignored),
        Key::Decimal if current_number(&state.buffer).contains('.') => {
            return Ok(Admission::Ignored);
        }
        _ => {}
    }

    if state.len() + text.chars().count() > max_len {
        return Err(CalcError::InputTooLong { max: max_len });
    }

    state.buffer.push_str(text);
    state.showing_result = false;
    Ok(Admission::Appended)
}

/// Remove the last character. A no-op on an empty buffer.
pub fn backspace(state: &mut InputState) -> Admission {
    if state.buffer.pop().is_none() {
        return Admission::Ignored;
    }
    state.showing_result = false;
    Admission::Removed
}

/// Whether the buffer's last character is an operator glyph.
pub fn ends_with_operator(buffer: &str) -> bool {
    buffer.chars().next_back().is_some_and(is_operator_glyph)
}

/// The numeric token the cursor is currently in.
fn current_number(buffer: &str) -> &str {
    TRAILING_NUMBER
        .find(buffer)
        .map(|m| m.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::key::Operator;

    const MAX: usize = 20;

    fn typed(input: &str) -> InputState {
        let mut state = InputState::default();
        for key in Key::parse_sequence(input).unwrap() {
            let _ = admit_key(&mut state, key, MAX);
        }
        state
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = InputState {
            buffer: "12".into(),
            showing_result: true,
        };
        assert_eq!(admit_key(&mut state, Key::Clear, MAX), Ok(Admission::Cleared));
        assert_eq!(state, InputState::default());
    }

    #[test]
    fn test_digit_after_result_starts_fresh() {
        let mut state = InputState::default();
        state.show_result("42".into());
        assert_eq!(
            admit_key(&mut state, Key::Digit(7), MAX),
            Ok(Admission::Replaced)
        );
        assert_eq!(state.buffer, "7");
        assert!(!state.showing_result);
    }

    #[test]
    fn test_operator_after_result_continues() {
        let mut state = InputState::default();
        state.show_result("42".into());
        admit_key(&mut state, Key::Operator(Operator::Add), MAX).unwrap();
        assert_eq!(state.buffer, "42+");
        assert!(!state.showing_result);
    }

    #[test]
    fn test_leading_zero_suppressed() {
        assert_eq!(typed("00").buffer, "0");
        assert_eq!(typed("000").buffer, "0");
    }

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(typed("05").buffer, "5");
        assert_eq!(typed("0.5").buffer, "0.5");
        // Only a lone leading zero is special.
        assert_eq!(typed("5÷00").buffer, "5÷00");
    }

    #[test]
    fn test_sqrt_appends_group() {
        assert_eq!(typed("√").buffer, "√(");
        assert_eq!(typed("2×√9)").buffer, "2×√(9)");
    }

    #[test]
    fn test_consecutive_operators_rejected() {
        assert_eq!(typed("3+-").buffer, "3+");
        assert_eq!(typed("3×÷").buffer, "3×");
        // A minus after an open paren is a sign, not a second operator.
        assert_eq!(typed("(-4)").buffer, "(-4)");
    }

    #[test]
    fn test_second_decimal_in_token_rejected() {
        assert_eq!(typed("1.2.3").buffer, "1.23");
        assert_eq!(typed("1.2+3.4").buffer, "1.2+3.4");
        assert_eq!(typed("(1.5).").buffer, "(1.5).");
    }

    #[test]
    fn test_max_length() {
        let mut state = InputState {
            buffer: "1".repeat(MAX),
            showing_result: false,
        };
        assert_eq!(
            admit_key(&mut state, Key::Digit(1), MAX),
            Err(CalcError::InputTooLong { max: MAX })
        );
        assert_eq!(state.buffer.len(), MAX);
    }

    #[test]
    fn test_max_length_counts_glyph_chars() {
        let mut state = InputState {
            buffer: "1×".repeat(MAX / 2 - 1) + "1",
            showing_result: false,
        };
        assert_eq!(state.len(), MAX - 1);
        assert_eq!(admit_key(&mut state, Key::Percent, MAX), Ok(Admission::Appended));
        assert_eq!(
            admit_key(&mut state, Key::Digit(1), MAX),
            Err(CalcError::InputTooLong { max: MAX })
        );
    }

    #[test]
    fn test_sqrt_needs_room_for_both_chars() {
        let mut state = InputState {
            buffer: "1".repeat(MAX - 1),
            showing_result: false,
        };
        assert!(admit_key(&mut state, Key::Sqrt, MAX).is_err());
        assert_eq!(state.len(), MAX - 1);
    }

    #[test]
    fn test_backspace() {
        let mut state = typed("12+");
        assert_eq!(backspace(&mut state), Admission::Removed);
        assert_eq!(state.buffer, "12");

        let mut empty = InputState::default();
        assert_eq!(backspace(&mut empty), Admission::Ignored);
        assert_eq!(empty.buffer, "");
    }

    #[test]
    fn test_backspace_removes_whole_glyph() {
        let mut state = typed("6÷");
        backspace(&mut state);
        assert_eq!(state.buffer, "6");
    }

    #[test]
    fn test_equals_is_not_admitted() {
        let mut state = typed("1+1");
        assert_eq!(admit_key(&mut state, Key::Equals, MAX), Ok(Admission::Ignored));
        assert_eq!(state.buffer, "1+1");
    }

    #[test]
    fn test_ends_with_operator() {
        assert!(ends_with_operator("3+"));
        assert!(ends_with_operator("3÷"));
        assert!(!ends_with_operator("3%"));
        assert!(!ends_with_operator(""));
    }
}
