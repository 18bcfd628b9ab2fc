//! Toast notifications raised by services.

use std::fmt;
use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    /// Something worked.
    Success,
    /// Something failed.
    Error,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Text.
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            ToastLevel::Success => write!(f, "✔ {}", self.message),
            ToastLevel::Error => write!(f, "✘ {}", self.message),
        }
    }
}

/// Receives toasts from mutation and query callbacks.
pub trait Notifier: Send + Sync + fmt::Debug + 'static {
    /// Show `toast`.
    fn notify(&self, toast: Toast);

    /// Show a success message.
    fn success(&self, message: &str) {
        self.notify(Toast {
            level: ToastLevel::Success,
            message: message.to_string(),
        });
    }

    /// Show an error message.
    fn error(&self, message: &str) {
        self.notify(Toast {
            level: ToastLevel::Error,
            message: message.to_string(),
        });
    }
}

/// Writes toasts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => info!(message = %toast.message, "toast"),
            ToastLevel::Error => warn!(message = %toast.message, "toast"),
        }
    }
}

/// Keeps toasts until they are drained.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every recorded toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.lock())
    }

    /// Copy of the recorded toasts.
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    /// Messages of the recorded toasts.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|t| t.message.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        TracingNotifier.notify(toast.clone());
        self.lock().push(toast);
    }
}
