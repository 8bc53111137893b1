//! The expression controller.
//!
//! Owns the input buffer, the result-state flag and the session history, and
//! is the only thing that mutates them. Every call runs to completion; there
//! is no shared or concurrent access.

use tracing::{debug, info, warn};

use crate::calculator::{
    Admission, CalcError, Evaluator, FastevalEvaluator, InputState, Key, admit_key, backspace,
    evaluate_buffer, format_result,
};
use crate::config::{Config, DEFAULT_MAX_INPUT_LEN};
use crate::history::{History, HistoryEntry};

/// Result of a single keypad tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyOutcome {
    /// The key was admitted (or silently dropped) without evaluating.
    Edited(Admission),
    /// `=` was pressed and the buffer evaluated to this value.
    Evaluated(f64),
}

pub struct ExpressionController<E = FastevalEvaluator> {
    evaluator: E,
    input: InputState,
    history: History,
    max_input_len: usize,
}

impl Default for ExpressionController {
    fn default() -> Self {
        Self::new(FastevalEvaluator)
    }
}

impl<E: Evaluator> ExpressionController<E> {
    /// Create a controller with default limits around `evaluator`.
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            input: InputState::default(),
            history: History::new(),
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }

    /// Build a controller with the limits from `config`.
    pub fn from_config(evaluator: E, config: &Config) -> Self {
        let history = match config.history_limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };
        Self {
            evaluator,
            input: InputState::default(),
            history,
            max_input_len: config.max_input_len,
        }
    }

    /// Override the maximum buffer length.
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    /// Handle one keypad tap.
    ///
    /// `=` commits the buffer; every other key goes through admission.
    pub fn admit_key(&mut self, key: Key) -> Result<KeyOutcome, CalcError> {
        if key == Key::Equals {
            return self.commit().map(KeyOutcome::Evaluated);
        }

        match admit_key(&mut self.input, key, self.max_input_len) {
            Ok(admission) => {
                debug!(%key, ?admission, buffer = %self.input.buffer, "key admitted");
                Ok(KeyOutcome::Edited(admission))
            }
            Err(err) => {
                debug!(%key, buffer = %self.input.buffer, "key rejected: {err}");
                Err(err)
            }
        }
    }

    /// Remove the last character of the buffer. A no-op when empty.
    pub fn backspace(&mut self) {
        backspace(&mut self.input);
    }

    /// Evaluate the buffer.
    ///
    /// On success the buffer shows the result and the expression is recorded
    /// in history. On failure the buffer is cleared and nothing is recorded.
    pub fn commit(&mut self) -> Result<f64, CalcError> {
        let expression = self.input.buffer.clone();

        match evaluate_buffer(&self.evaluator, &expression) {
            Ok(value) => {
                info!(%expression, value, "expression evaluated");
                self.history.record(HistoryEntry::new(expression, value));
                self.input.show_result(format_result(value));
                Ok(value)
            }
            Err(err) => {
                if err.is_precondition() {
                    debug!(%expression, "not committable: {err}");
                } else {
                    warn!(%expression, kind = ?err.kind(), detail = ?err, "evaluation failed");
                }
                self.input.clear();
                Err(err)
            }
        }
    }

    /// Drop every history entry. The buffer is left alone.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Successful calculations so far, oldest first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The raw buffer contents.
    pub fn buffer(&self) -> &str {
        &self.input.buffer
    }

    /// What the display shows: the buffer, or `0` when it is empty.
    pub fn display(&self) -> &str {
        if self.input.buffer.is_empty() {
            "0"
        } else {
            &self.input.buffer
        }
    }

    /// Whether the buffer holds a just-computed result.
    pub fn showing_result(&self) -> bool {
        self.input.showing_result
    }

    /// Maximum number of characters admission accepts.
    pub fn max_input_len(&self) -> usize {
        self.max_input_len
    }

    /// The evaluator commits are delegated to.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}
