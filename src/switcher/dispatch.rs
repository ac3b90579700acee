//! OS build based routing between the legacy and the modern theme API.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::context::ThemeState;
use super::legacy::LegacyApiInvoker;
use super::modern::ModernApiInvoker;
use super::types::{ModernOutcome, ThemeDescriptor};
use crate::services::ThemeFileService;

/// First OS build that ships the name-based theme API.
pub const MODERN_API_MIN_BUILD: u32 = 22621;

/// Switches slower than this are reported as a warning.
pub const SLOW_SWITCH_THRESHOLD: Duration = Duration::from_secs(10);

/// What: Picks the theme API generation for the running OS build.
///
/// Details:
/// - The build number is read once, at construction. Nothing else in the crate
///   branches on the OS version.
#[derive(Clone)]
pub struct VersionDispatcher {
    /// OS build number captured at construction.
    build: u32,
    /// Path-based API driver; also the mitigation fallback.
    legacy: LegacyApiInvoker,
    /// Name-based API driver.
    modern: ModernApiInvoker,
    /// Reads display names out of theme files.
    files: Arc<dyn ThemeFileService>,
    /// Accepted modern switches slower than this are reported.
    slow_threshold: Duration,
}

impl VersionDispatcher {
    /// What: Create a dispatcher for a known OS build.
    #[must_use]
    pub fn new(
        build: u32,
        legacy: LegacyApiInvoker,
        modern: ModernApiInvoker,
        files: Arc<dyn ThemeFileService>,
    ) -> Self {
        Self {
            build,
            legacy,
            modern,
            files,
            slow_threshold: SLOW_SWITCH_THRESHOLD,
        }
    }

    /// What: Override the duration after which a switch is reported as slow.
    #[must_use]
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    /// What: Create a dispatcher for the running OS build.
    #[must_use]
    pub fn detect(
        legacy: LegacyApiInvoker,
        modern: ModernApiInvoker,
        files: Arc<dyn ThemeFileService>,
    ) -> Self {
        let build = crate::system::os_build();
        tracing::debug!(build, "detected OS build");
        Self::new(build, legacy, modern, files)
    }

    /// OS build this dispatcher routes for.
    #[must_use]
    pub const fn build(&self) -> u32 {
        self.build
    }

    /// Whether the modern API path is used.
    #[must_use]
    pub const fn uses_modern_api(&self) -> bool {
        self.build >= MODERN_API_MIN_BUILD
    }

    /// The legacy invoker, used for queries.
    #[must_use]
    pub const fn legacy(&self) -> &LegacyApiInvoker {
        &self.legacy
    }

    /// What: Apply a theme through the API generation of the running build.
    ///
    /// Inputs:
    /// - `state`: Locked switcher state; the caller holds the context lock for the
    ///   whole call.
    /// - `path`: The user's theme file (managed applies apply exactly this file).
    /// - `suppress_log`: Skip success log lines.
    /// - `derived`: Derived copy to apply instead of `path`, when one was made.
    pub fn apply(
        &self,
        state: &mut ThemeState,
        path: &Path,
        suppress_log: bool,
        derived: Option<&ThemeDescriptor>,
    ) {
        let theme_file = derived.map_or(path, |d| d.unmanaged_path.as_path());
        if self.uses_modern_api() {
            let _ = self.apply_modern(state, path, theme_file, suppress_log);
        } else if self
            .legacy
            .apply_by_path(theme_file, &mut state.tracker, true)
            && !suppress_log
        {
            tracing::info!(path = %path.display(), "applied theme via legacy theme API");
        }
    }

    /// What: Apply by display name, falling back to the legacy API and learning the
    /// OS-assigned name when the modern API does not know the name yet.
    ///
    /// Inputs:
    /// - `state`: Locked switcher state.
    /// - `original_path`: The user's theme file.
    /// - `theme_file`: File actually applied (derived copy or `original_path`).
    /// - `suppress_log`: Skip success log lines.
    ///
    /// Details:
    /// - Name extraction failure is logged and skips the modern call entirely.
    /// - A non-empty learned association for the file's name is tried instead of the
    ///   raw name.
    /// - The tracker is set to `theme_file` whatever the outcome.
    ///
    /// Output:
    /// - Whether the switch was reported as slow.
    fn apply_modern(
        &self,
        state: &mut ThemeState,
        original_path: &Path,
        theme_file: &Path,
        suppress_log: bool,
    ) -> bool {
        let start = Instant::now();

        let name_from_file = match self.files.extract_display_name(theme_file) {
            Ok((_, name)) => Some(name),
            Err(e) => {
                tracing::error!(
                    path = %theme_file.display(),
                    error = %e,
                    "could not retrieve display name"
                );
                None
            }
        };

        let outcome = name_from_file.as_deref().map_or(ModernOutcome::Rejected, |name| {
            let candidate = state
                .learned
                .resolve(name)
                .filter(|learned| !learned.is_empty())
                .unwrap_or(name);
            self.modern.set_theme(candidate, original_path)
        });

        match (outcome, name_from_file.as_deref()) {
            (ModernOutcome::Resolved, _) => {
                if !suppress_log {
                    tracing::info!(
                        path = %original_path.display(),
                        "applied theme via modern theme API"
                    );
                }
            }
            (ModernOutcome::UnresolvedButAccepted, Some(name)) => {
                tracing::warn!("theme name not found by modern theme API, using mitigation");
                self.legacy
                    .apply_by_path(theme_file, &mut state.tracker, suppress_log);
                let os_name = self.legacy.query_current_display_name();
                if os_name.is_empty() {
                    tracing::warn!(name, "OS did not report a theme name");
                }
                state.learned.learn(name, &os_name);
                state.learned.maybe_flush();
            }
            (ModernOutcome::UnresolvedButAccepted, None) | (ModernOutcome::Rejected, _) => {
                tracing::warn!(
                    path = %original_path.display(),
                    "modern theme API did not apply the theme"
                );
            }
        }

        state.tracker.set(theme_file);

        self.report_slow_switch(start.elapsed(), outcome)
    }

    /// What: Warn when an accepted switch exceeded the slow threshold.
    ///
    /// Output:
    /// - `true` when the warning was emitted.
    fn report_slow_switch(&self, elapsed: Duration, outcome: ModernOutcome) -> bool {
        let slow = elapsed > self.slow_threshold && outcome.accepted();
        if slow {
            tracing::warn!(
                secs = elapsed.as_secs_f64(),
                "theme switching took longer than expected"
            );
        }
        slow
    }
}
