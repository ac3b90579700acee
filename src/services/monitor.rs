use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::ActiveThemeMonitor;

/// What: Pause window shared between the switcher and a theme change watcher.
///
/// Details:
/// - The switcher calls [`ActiveThemeMonitor::pause`] before applying a theme;
///   the watcher checks [`PauseGate::is_paused`] and drops events while it is set,
///   so its own switch is not mistaken for a user change.
/// - Overlapping pauses keep the later deadline.
#[derive(Debug, Default)]
pub struct PauseGate {
    /// Instant until which notifications are ignored.
    until: Mutex<Option<Instant>>,
}

impl PauseGate {
    /// Create an unpaused gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether notifications should currently be ignored.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.until
            .lock()
            .map(|g| g.is_some_and(|t| Instant::now() < t))
            .unwrap_or(false)
    }
}

impl ActiveThemeMonitor for PauseGate {
    fn pause(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        if let Ok(mut guard) = self.until.lock() {
            if guard.is_none_or(|t| t < deadline) {
                *guard = Some(deadline);
            }
            tracing::debug!(secs = duration.as_secs_f64(), "theme monitor paused");
        }
    }
}
