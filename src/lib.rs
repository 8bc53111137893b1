//! Calculator core: keypad admission, sanitized evaluation and session history.
//!
//! The UI layer drives an [`ExpressionController`] with keypad taps, renders
//! [`ExpressionController::display`] and the [`History`], and reports failures
//! through a [`Notifier`].

pub mod calculator;
pub mod config;
pub mod controller;
pub mod history;
pub mod notify;

pub use calculator::{CalcError, Evaluator, FailureKind, FastevalEvaluator, Key, Operator};
pub use config::{Config, Theme};
pub use controller::{ExpressionController, KeyOutcome};
pub use history::{History, HistoryEntry};
pub use notify::{LogNotifier, Notification, Notifier, Presentation, RecordingNotifier};
