//! User-facing error reporting.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Surfaces human-readable error messages, e.g. as a toast.
///
/// Fire-and-forget: the manager never inspects the outcome.
pub trait Notifier: Send + Sync {
    /// Show an error message to the user.
    fn report_error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn report_error(&self, message: &str) {
        (**self).report_error(message)
    }
}

/// Emits each message as a `warn` event. For headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn report_error(&self, message: &str) {
        tracing::warn!(target: "rocket_cart::notify", "{}", message);
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Number of messages reported so far.
    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or_default()
    }

    /// Check if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain and return the recorded messages.
    pub fn take(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut m| std::mem::take(&mut *m))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn report_error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// Text shown for each failure. Override for localization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationMessages {
    /// Requested quantity exceeds stock.
    pub out_of_stock: String,
    /// Target quantity is zero or negative.
    pub invalid_amount: String,
    /// Any other failure while adding.
    pub add_failed: String,
    /// Any failure while removing.
    pub remove_failed: String,
    /// Any other failure while changing an amount.
    pub update_failed: String,
}

impl Default for NotificationMessages {
    fn default() -> Self {
        Self {
            out_of_stock: "Requested quantity is out of stock".to_string(),
            invalid_amount: "Requested quantity must be at least 1".to_string(),
            add_failed: "Could not add the product".to_string(),
            remove_failed: "Could not remove the product".to_string(),
            update_failed: "Could not change the product quantity".to_string(),
        }
    }
}
