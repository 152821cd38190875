//! Desktop notification delivery

use notify_rust::{Notification, Timeout};
use tracing::{debug, warn};

const APP_NAME: &str = "pomodoro-timer";

/// Fire-and-forget notification sink. Implementations must return quickly
/// and swallow their own delivery failures.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str, duration_secs: u32);
}

/// Notifications through the desktop notification daemon
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str, duration_secs: u32) {
        let title = title.to_string();
        let body = body.to_string();

        // Delivery talks to the session bus and may block, keep it off the caller
        let show = move || {
            debug!("Showing notification: {}", title);
            if let Err(e) = Notification::new()
                .appname(APP_NAME)
                .summary(&title)
                .body(&body)
                .timeout(Timeout::Milliseconds(duration_secs.saturating_mul(1000)))
                .show()
            {
                warn!("Failed to show notification '{}': {}", title, e);
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(show);
            }
            Err(_) => {
                std::thread::spawn(show);
            }
        }
    }
}
