// Notification bridge - turns operation outcomes into one-shot toasts
//
// Outcomes are moved into the bridge, so each completed request yields
// exactly one toast no matter how often the screen is redrawn. Toasts expire
// on their own; the UI prunes them on every tick.

use crate::events::Outcome;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default time a toast stays on screen
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Upper bound on toasts kept on screen at once
const MAX_VISIBLE_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✗",
        }
    }
}

/// A transient notification that auto-dismisses
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Icon-prefixed text as rendered
    pub fn text(&self) -> String {
        format!("{} {}", self.level.icon(), self.message)
    }
}

/// Surfaces each outcome once as a toast
#[derive(Debug)]
pub struct NotificationBridge {
    toasts: VecDeque<Toast>,
    duration: Duration,
    surfaced: usize,
}

impl NotificationBridge {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
            surfaced: 0,
        }
    }

    /// Consume an outcome and show it
    pub fn on_outcome(&mut self, outcome: Outcome) -> &Toast {
        match outcome.result {
            Ok(message) => {
                tracing::info!("{} succeeded: {}", outcome.operation, message);
                self.push(ToastLevel::Success, message)
            }
            Err(e) => {
                tracing::warn!("{} failed: {}", outcome.operation, e);
                self.push(ToastLevel::Error, e.message)
            }
        }
    }

    /// Show an error that never reached the account service (validation)
    pub fn error(&mut self, message: impl Into<String>) -> &Toast {
        self.push(ToastLevel::Error, message)
    }

    fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> &Toast {
        if self.toasts.len() >= MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
        }
        self.surfaced += 1;
        self.toasts.push_back(Toast::new(level, message, self.duration));
        &self.toasts[self.toasts.len() - 1]
    }

    /// Drop toasts whose time is up
    pub fn prune_expired(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Toasts currently on screen, oldest first
    pub fn active(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Total notifications shown since start
    pub fn surfaced_count(&self) -> usize {
        self.surfaced
    }
}

impl Default for NotificationBridge {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Operation;

    #[test]
    fn test_error_surfaces_once() {
        let mut bridge = NotificationBridge::default();
        let toast = bridge.on_outcome(Outcome::failure(Operation::ProfileUpdate, "Update failed"));
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, "Update failed");

        // Redraws and ticks do not re-fire it
        bridge.prune_expired();
        bridge.prune_expired();
        assert_eq!(bridge.surfaced_count(), 1);
        assert_eq!(bridge.active().count(), 1);
    }

    #[test]
    fn test_concurrent_outcomes_each_surface() {
        let mut bridge = NotificationBridge::default();
        bridge.on_outcome(Outcome::failure(Operation::ProfileUpdate, "Update failed"));
        bridge.on_outcome(Outcome::success(Operation::Logout, "Logged out successfully"));

        let levels: Vec<_> = bridge.active().map(|t| t.level).collect();
        assert_eq!(levels, vec![ToastLevel::Error, ToastLevel::Success]);
        assert_eq!(bridge.surfaced_count(), 2);
    }

    #[test]
    fn test_toasts_expire() {
        let mut bridge = NotificationBridge::new(Duration::ZERO);
        bridge.error("Email is required");
        bridge.prune_expired();
        assert_eq!(bridge.active().count(), 0);
        assert_eq!(bridge.surfaced_count(), 1);
    }

    #[test]
    fn test_visible_toasts_are_bounded() {
        let mut bridge = NotificationBridge::default();
        for i in 0..10 {
            bridge.error(format!("error {}", i));
        }
        assert_eq!(bridge.active().count(), MAX_VISIBLE_TOASTS);
        assert_eq!(bridge.active().last().map(|t| t.message.as_str()), Some("error 9"));
    }

    #[test]
    fn test_toast_text_has_icon() {
        let toast = Toast::new(ToastLevel::Success, "Saved", DEFAULT_TOAST_DURATION);
        assert_eq!(toast.text(), "✓ Saved");
        assert!(!toast.is_expired());
    }
}
