//! Notifications for the outcome of user actions
//!
//! Success and failure both go through [`Notifier`]; the web layer turns
//! notifications into toasts while errors are only logged.

use crate::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub const DELETE_SUCCESS_TITLE: &str = "✅ Success";
pub const DELETE_SUCCESS_DESCRIPTION: &str = "Selected transactions have been successfully deleted.";

/// A user-visible success message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn delete_succeeded() -> Self {
        Self {
            title: DELETE_SUCCESS_TITLE.to_string(),
            description: DELETE_SUCCESS_DESCRIPTION.to_string(),
        }
    }
}

/// Sink for action outcomes
pub trait Notifier: Send + Sync {
    /// Show a message to the user
    fn notify(&self, notification: &Notification);

    /// Report a failed action. Not shown to the user by default.
    fn report_error(&self, error: &CoreError, context: &ErrorContext) {
        DefaultErrorLogger.log_error(error, context);
    }
}

/// Logs notifications instead of showing them
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        log::info!("{}: {}", notification.title, notification.description);
    }
}

/// Collects notifications and errors for later inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
    errors: Mutex<Vec<CoreError>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<CoreError> {
        self.errors.lock().unwrap().clone()
    }

    /// Take the collected notifications, leaving none behind
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.lock().unwrap())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.notifications.lock().unwrap().push(notification.clone());
    }

    fn report_error(&self, error: &CoreError, context: &ErrorContext) {
        DefaultErrorLogger.log_error(error, context);
        self.errors.lock().unwrap().push(error.clone());
    }
}
