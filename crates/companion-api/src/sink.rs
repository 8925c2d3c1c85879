//! Console implementations of the notification and navigation sinks.

use console::style;
use tracing::debug;

use companion_core::sink::{Navigator, Notifier, Severity};

/// Prints notifications as a single styled status line on stderr.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    silent: bool,
}

impl ConsoleNotifier {
    /// `silent` suppresses output (JSON and quiet modes).
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        debug!(?severity, text = message, "notify");
        if self.silent {
            return;
        }
        match severity {
            Severity::Normal => eprintln!("  {} {}", style("✓").green().bold(), message),
            Severity::Error => eprintln!("  {} {}", style("✗").red().bold(), style(message).red()),
        }
    }
}

/// "Navigates" by pointing the user at the store's page for a route.
///
/// A terminal has no cached server-rendered view, so refreshing is only
/// logged.
#[derive(Debug, Clone)]
pub struct ConsoleNavigator {
    base_url: String,
    silent: bool,
}

impl ConsoleNavigator {
    pub fn new(base_url: &str, silent: bool) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            silent,
        }
    }

    fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Navigator for ConsoleNavigator {
    fn refresh_current_view(&self) {
        debug!("refresh current view");
    }

    fn navigate(&self, path: &str) {
        let url = self.page_url(path);
        debug!(%url, "navigate");
        if !self.silent {
            eprintln!("  {} {}", style("→").dim(), style(url).cyan());
        }
    }
}
