//! User notifications for failed input and evaluation.
//!
//! The controller never shows anything itself. The front end turns a
//! [`CalcError`] into a [`Notification`] and hands it to whatever
//! [`Notifier`] it renders with.

use tracing::warn;

use crate::calculator::{CalcError, FailureKind};

/// How prominently a notification is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// Short-lived, non-blocking message.
    Toast,
    /// Dialog that must be dismissed.
    Modal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: FailureKind,
    pub presentation: Presentation,
    pub title: &'static str,
    pub message: String,
}

impl From<&CalcError> for Notification {
    fn from(err: &CalcError) -> Self {
        let kind = err.kind();
        // Rejected keystrokes get a toast; failed commits get the error dialog.
        let (presentation, title) = match kind {
            FailureKind::InputTooLong => (Presentation::Toast, "Input too long"),
            _ => (Presentation::Modal, "Error"),
        };

        Self {
            kind,
            presentation,
            title,
            message: err.to_string(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Keeps every notification in order. Used where the caller inspects what
/// would have been shown.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    pub notifications: Vec<Notification>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

/// Notifier that only writes to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        warn!(
            kind = ?notification.kind,
            presentation = ?notification.presentation,
            "{}: {}",
            notification.title,
            notification.message
        );
    }
}
