use crate::domain::model::{Notification, Severity};
use crate::domain::ports::Notifier;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

struct Toast {
    id: u64,
    notification: Notification,
    expires_at: Instant,
}

/// Auto-dismissing notification stack.
///
/// Every toast gets its own removal timer on the current tokio runtime.
/// Expired toasts are also dropped whenever the stack is read, so the display
/// window holds even when no runtime is available to run the timers.
#[derive(Clone)]
pub struct ToastChannel {
    toasts: Arc<Mutex<Vec<Toast>>>,
    next_id: Arc<AtomicU64>,
    duration: Duration,
}

impl ToastChannel {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Toasts currently on screen, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        let mut toasts = lock(&self.toasts);
        let now = Instant::now();
        toasts.retain(|toast| toast.expires_at > now);
        toasts.iter().map(|toast| toast.notification.clone()).collect()
    }

    fn push(&self, notification: Notification) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let expires_at = Instant::now() + self.duration;
        lock(&self.toasts).push(Toast {
            id,
            notification,
            expires_at,
        });
        id
    }
}

impl Default for ToastChannel {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Notifier for ToastChannel {
    fn notify(&self, message: &str, severity: Severity) {
        tracing::debug!(severity = %severity, "toast: {}", message);
        let id = self.push(Notification::new(message, severity));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let toasts = Arc::clone(&self.toasts);
            let duration = self.duration;
            handle.spawn(async move {
                tokio::time::sleep(duration).await;
                lock(&toasts).retain(|toast| toast.id != id);
            });
        }
    }
}

fn lock(toasts: &Mutex<Vec<Toast>>) -> MutexGuard<'_, Vec<Toast>> {
    toasts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
