use std::path::Path;
use std::sync::Arc;

use super::api::LegacyThemeApi;
use super::apartment::run_in_apartment;
use super::tracker::ActiveThemeTracker;
use crate::error::ThemeError;

/// What: Drives the path-based legacy theme API on its apartment thread.
///
/// Details:
/// - Every call blocks the caller until the apartment thread finished.
/// - Failures are logged here and never returned; callers observe them only as a
///   tracker that was not updated or an empty name.
#[derive(Clone)]
pub struct LegacyApiInvoker {
    /// Backend performing the actual OS calls.
    api: Arc<dyn LegacyThemeApi>,
}

impl LegacyApiInvoker {
    /// Wrap a legacy API backend.
    #[must_use]
    pub fn new(api: Arc<dyn LegacyThemeApi>) -> Self {
        Self { api }
    }

    /// What: Apply the theme file at `path` and record it on success.
    ///
    /// Inputs:
    /// - `path`: Theme file to apply.
    /// - `tracker`: Tracker updated to `path` when the OS call succeeds. The caller
    ///   holds the context lock for it.
    /// - `suppress_log`: Skip the success log line.
    ///
    /// Output:
    /// - `true` when the theme was applied and the tracker updated.
    pub fn apply_by_path(
        &self,
        path: &Path,
        tracker: &mut ActiveThemeTracker,
        suppress_log: bool,
    ) -> bool {
        match run_in_apartment(|| self.api.apply_theme(path)) {
            Ok(Ok(())) => {
                tracker.set(path);
                if !suppress_log {
                    tracing::info!(path = %path.display(), "applied theme via legacy theme API");
                }
                true
            }
            Ok(Err(e)) => {
                tracing::error!(path = %path.display(), error = %e, "could not apply theme");
                false
            }
            Err(e) => {
                log_interrupted(&e);
                false
            }
        }
    }

    /// What: Ask the OS which theme display name is currently active.
    ///
    /// Output:
    /// - The display name, or an empty string when the query failed.
    #[must_use]
    pub fn query_current_display_name(&self) -> String {
        match run_in_apartment(|| self.api.current_theme_name()) {
            Ok(Ok(name)) => name,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "could not retrieve active theme name");
                String::new()
            }
            Err(e) => {
                log_interrupted(&e);
                String::new()
            }
        }
    }

    /// What: File name of the active visual style, or an empty string on failure.
    #[must_use]
    pub fn query_current_visual_style(&self) -> String {
        match run_in_apartment(|| self.api.current_visual_style()) {
            Ok(Ok(style)) => style
                .rsplit(['\\', '/'])
                .next()
                .unwrap_or_default()
                .to_string(),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "could not retrieve active visual style");
                String::new()
            }
            Err(e) => {
                log_interrupted(&e);
                String::new()
            }
        }
    }
}

/// Log a failed wait on the apartment thread.
pub(super) fn log_interrupted(e: &ThemeError) {
    tracing::error!(error = %e, "theme handler thread was interrupted");
}
