use std::path::Path;
use std::sync::Arc;

use super::api::ModernThemeApi;
use super::apartment::run_in_apartment;
use super::legacy::log_interrupted;
use super::types::ModernOutcome;

/// What: Drives the name-based modern theme API on its apartment thread.
#[derive(Clone)]
pub struct ModernApiInvoker {
    /// Backend performing the actual OS call.
    api: Arc<dyn ModernThemeApi>,
}

impl ModernApiInvoker {
    /// Wrap a modern API backend.
    #[must_use]
    pub fn new(api: Arc<dyn ModernThemeApi>) -> Self {
        Self { api }
    }

    /// What: Switch to the installed theme named `display_name`.
    ///
    /// Inputs:
    /// - `display_name`: Name to resolve among installed themes.
    /// - `original_path`: User's configured theme file, for diagnostics.
    ///
    /// Output:
    /// - `Resolved`, `UnresolvedButAccepted`, or `Rejected` when the call failed.
    ///
    /// Details:
    /// - Call failures and apartment interruptions are logged and reported as
    ///   `Rejected`; nothing is propagated.
    #[must_use]
    pub fn set_theme(&self, display_name: &str, original_path: &Path) -> ModernOutcome {
        match run_in_apartment(|| self.api.set_theme(display_name, original_path)) {
            Ok(Ok(true)) => ModernOutcome::Resolved,
            Ok(Ok(false)) => ModernOutcome::UnresolvedButAccepted,
            Ok(Err(e)) => {
                tracing::error!(
                    name = display_name,
                    path = %original_path.display(),
                    error = %e,
                    "modern theme API failed"
                );
                ModernOutcome::Rejected
            }
            Err(e) => {
                log_interrupted(&e);
                ModernOutcome::Rejected
            }
        }
    }
}
