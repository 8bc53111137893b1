//! Keypad tokens.
//!
//! The keypad sends one token per tap. Display glyphs (`×`, `÷`, `√`) are what
//! ends up in the buffer; ASCII aliases are accepted for keyboard input.

use std::fmt;
use std::str::FromStr;

use super::error::UnknownKey;

/// Binary operators shown on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The glyph written into the buffer.
    pub fn glyph(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Map a buffer glyph or keyboard alias back to an operator.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '×' | '*' | 'x' | 'X' => Some(Self::Multiply),
            '÷' | '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

/// Check whether a buffer character is one of the operator glyphs.
pub fn is_operator_glyph(c: char) -> bool {
    Operator::ALL.iter().any(|op| op.glyph() == c)
}

/// A single keypad tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Decimal,
    Operator(Operator),
    OpenParen,
    CloseParen,
    Sqrt,
    Percent,
    Clear,
    Equals,
    Backspace,
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Key {
    /// Text appended to the buffer for this key, if it appends anything.
    pub fn text(self) -> Option<&'static str> {
        match self {
            Self::Digit(d) => DIGITS.get(d as usize).copied(),
            Self::Decimal => Some("."),
            Self::Operator(Operator::Add) => Some("+"),
            Self::Operator(Operator::Subtract) => Some("-"),
            Self::Operator(Operator::Multiply) => Some("×"),
            Self::Operator(Operator::Divide) => Some("÷"),
            Self::OpenParen => Some("("),
            Self::CloseParen => Some(")"),
            Self::Sqrt => Some("√("),
            Self::Percent => Some("%"),
            Self::Clear | Self::Equals | Self::Backspace => None,
        }
    }

    /// Map a single typed character to a key.
    ///
    /// Accepts keypad glyphs plus `*`, `/`, `x` for multiply/divide and
    /// `<` for backspace.
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Some(Self::Digit(d as u8));
        }
        if let Some(op) = Operator::from_char(c) {
            return Some(Self::Operator(op));
        }
        match c {
            '.' | ',' => Some(Self::Decimal),
            '(' => Some(Self::OpenParen),
            ')' => Some(Self::CloseParen),
            '√' => Some(Self::Sqrt),
            '%' => Some(Self::Percent),
            'C' | 'c' => Some(Self::Clear),
            '=' => Some(Self::Equals),
            '<' | '⌫' => Some(Self::Backspace),
            _ => None,
        }
    }

    /// Split a run of typed characters into keys, ignoring whitespace.
    pub fn parse_sequence(input: &str) -> Result<Vec<Key>, UnknownKey> {
        input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Self::from_char(c).ok_or_else(|| UnknownKey(c.to_string())))
            .collect()
    }

    pub fn is_digit(self) -> bool {
        matches!(self, Self::Digit(_))
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqrt" => return Ok(Self::Sqrt),
            "back" | "backspace" => return Ok(Self::Backspace),
            _ => {}
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or_else(|| UnknownKey(s.to_string())),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => f.write_str("C"),
            Self::Equals => f.write_str("="),
            Self::Backspace => f.write_str("⌫"),
            Self::Sqrt => f.write_str("√"),
            other => f.write_str(other.text().unwrap_or_default()),
        }
    }
}
