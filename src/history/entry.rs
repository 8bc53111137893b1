//! A single successful calculation.

use serde::{Deserialize, Serialize};

use crate::calculator::{format_display, format_result};

/// An evaluated expression and its result. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The buffer as the user typed it, in display glyphs.
    expression: String,
    result: f64,
}

impl HistoryEntry {
    /// Create an entry for an expression that evaluated to `result`.
    pub fn new(expression: impl Into<String>, result: f64) -> Self {
        Self {
            expression: expression.into(),
            result,
        }
    }

    /// The expression as typed.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    /// The result formatted for display (with thousand separators).
    pub fn display_result(&self) -> String {
        format_display(self.result)
    }

    /// The result formatted for clipboard (raw number).
    pub fn text_for_clipboard(&self) -> String {
        format_result(self.result)
    }

    /// The history line shown to the user, `"<expression> = <result>"`.
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.display_result())
    }
}
