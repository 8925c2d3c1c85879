//! Notification and navigation sinks.
//!
//! The submission workflow reports to the user and moves them around
//! through these two traits. Both are called synchronously, in order, and
//! never concurrently for the same submission.

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    /// Destructive styling; used for failed saves.
    Error,
}

/// Surfaces short messages to the user (toast, status line, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Moves the user between views.
pub trait Navigator: Send + Sync {
    /// Refresh any cached server-rendered view so it reflects the save.
    fn refresh_current_view(&self);

    /// Redirect to `path`.
    fn navigate(&self, path: &str);
}
