//! Trailing-edge debouncing.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::trace;

/// Runs an action with the latest value once calls have stopped for `delay`.
///
/// Every call restarts the quiet period. Only the value from the last call
/// before the period elapses reaches the action.
pub struct Debouncer<T> {
    delay: Duration,
    seq: Arc<AtomicU64>,
    pending: Arc<Mutex<Option<T>>>,
    action: Arc<dyn Fn(T) + Send + Sync>,
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("seq", &self.seq.load(Ordering::Relaxed))
            .finish()
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer that hands settled values to `action`.
    pub fn new(delay: Duration, action: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            seq: Arc::new(AtomicU64::new(0)),
            pending: Arc::new(Mutex::new(None)),
            action: Arc::new(action),
        }
    }

    /// Quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record `value` and restart the quiet period. Must be called from
    /// within a Tokio runtime.
    pub fn call(&self, value: T) {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        *lock(&self.pending) = Some(value);

        let seq = Arc::clone(&self.seq);
        let pending = Arc::clone(&self.pending);
        let action = Arc::clone(&self.action);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if seq.load(Ordering::SeqCst) != ticket {
                trace!(ticket, "Debounced call superseded");
                return;
            }
            let value = lock(&pending).take();
            if let Some(value) = value {
                action(value);
            }
        });
    }

    /// Run the action now with the pending value, if any.
    pub fn flush(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        let value = lock(&self.pending).take();
        if let Some(value) = value {
            (self.action)(value);
        }
    }

    /// Drop the pending value without running the action.
    pub fn cancel(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        lock(&self.pending).take();
    }

    /// Whether a value is waiting for the quiet period to end.
    pub fn is_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}
