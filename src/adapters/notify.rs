use crate::core::toast::ToastChannel;
use crate::domain::model::{Notification, Severity};
use crate::domain::ports::Notifier;
use std::time::Duration;

/// Prints notifications for a terminal user and mirrors them into the log.
///
/// Each notification also goes on a `ToastChannel`, so the ones still inside
/// their display window can be listed again.
#[derive(Clone, Default)]
pub struct ConsoleNotifier {
    toasts: ToastChannel,
}

impl ConsoleNotifier {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            toasts: ToastChannel::new(toast_duration),
        }
    }

    /// Notifications still inside their display window.
    pub fn visible(&self) -> Vec<Notification> {
        self.toasts.visible()
    }

    pub fn render(message: &str, severity: Severity) -> String {
        let icon = match severity {
            Severity::Info => "ℹ️",
            Severity::Success => "✅",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        };
        format!("{} {}", icon, message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Info | Severity::Success => tracing::info!("{}", message),
        }
        eprintln!("{}", Self::render(message, severity));
        self.toasts.notify(message, severity);
    }
}
