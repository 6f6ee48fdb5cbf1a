use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

/// Display options for a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToastOptions {
    /// `None` keeps the notification on screen until dismissed.
    pub auto_close: Option<Duration>,
    pub pause_on_hover: bool,
}

impl ToastOptions {
    /// Closes after three seconds and ignores hover.
    pub fn transient() -> Self {
        Self {
            auto_close: Some(Duration::from_millis(3000)),
            pause_on_hover: false,
        }
    }
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            auto_close: Some(Duration::from_millis(5000)),
            pause_on_hover: true,
        }
    }
}

/// Non-blocking user feedback channel.
pub trait NotificationService: Send + Sync {
    fn error(&self, message: &str, options: ToastOptions);
}

/// Notification captured by [`NotificationLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub options: ToastOptions,
}

/// Writes notifications to the log; used by the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationService for TracingNotifier {
    fn error(&self, message: &str, options: ToastOptions) {
        tracing::warn!(
            auto_close_ms = options.auto_close.map(|d| d.as_millis() as u64),
            "{message}"
        );
    }
}

/// Collects notifications so a page can render them after the request.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn entries(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }
}

impl NotificationService for NotificationLog {
    fn error(&self, message: &str, options: ToastOptions) {
        let notification = Notification {
            message: message.to_string(),
            options,
        };
        match self.entries.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}
