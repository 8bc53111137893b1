//! Calculator module for building and evaluating keypad expressions.
//!
//! This module provides functionality to:
//! - Admit keypad taps into the input buffer
//! - Check and sanitize the buffer before evaluation
//! - Evaluate expressions using fasteval and classify the outcome
//! - Copy results to the clipboard

mod admission;
mod clipboard;
mod error;
mod evaluation;
mod key;
mod sanitize;

pub use admission::{Admission, InputState, admit_key, backspace, ends_with_operator};
pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use error::{CalcError, EvaluatorError, FailureKind, UnknownKey};
pub use evaluation::{
    Evaluator, FastevalEvaluator, classify, evaluate_buffer, format_display, format_result,
};
pub use key::{Key, Operator, is_operator_glyph};
pub use sanitize::{check_committable, sanitize};
