use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::context::ThemeContext;
use super::decision::ThemeDecisionEngine;
use super::dispatch::VersionDispatcher;
use super::types::{Theme, UnmanagedPaths};
use crate::config::ThemeConfig;
use crate::error::Result;
use crate::services::{ActiveThemeMonitor, PowerService, ThemeFileService};

/// How long the active theme monitor is paused around a switch.
pub const MONITOR_GRACE: Duration = Duration::from_secs(10);

/// What: Collaborators the applier delegates to.
#[derive(Clone)]
pub struct Collaborators {
    /// Theme file derivation and patching.
    pub files: Arc<dyn ThemeFileService>,
    /// Energy saver suspension.
    pub power: Arc<dyn PowerService>,
    /// Optional watcher of user-driven theme changes.
    pub monitor: Option<Arc<dyn ActiveThemeMonitor>>,
}

/// What: Top-level theme switching entry point.
///
/// Details:
/// - Owns the decision engine and the version dispatcher and shares the
///   [`ThemeContext`] with whoever else needs to read switcher state.
/// - Every apply holds the context lock from derivation until the tracker update.
pub struct ThemeApplier {
    /// Read-only configuration.
    config: Arc<ThemeConfig>,
    /// Shared, lock-guarded tracker and learning store.
    context: Arc<ThemeContext>,
    /// Precondition and idempotence checks.
    decision: ThemeDecisionEngine,
    /// Legacy/modern API routing.
    dispatcher: VersionDispatcher,
    /// External collaborators.
    services: Collaborators,
}

impl ThemeApplier {
    /// What: Assemble an applier.
    ///
    /// Inputs:
    /// - `config`: Read-only configuration.
    /// - `context`: Shared switcher state.
    /// - `paths`: Canonical derived theme locations.
    /// - `dispatcher`: API routing for the running build.
    /// - `services`: External collaborators.
    #[must_use]
    pub fn new(
        config: Arc<ThemeConfig>,
        context: Arc<ThemeContext>,
        paths: UnmanagedPaths,
        dispatcher: VersionDispatcher,
        services: Collaborators,
    ) -> Self {
        let decision = ThemeDecisionEngine::new(Arc::clone(&config), paths);
        Self {
            config,
            context,
            decision,
            dispatcher,
            services,
        }
    }

    /// Shared switcher state.
    #[must_use]
    pub const fn context(&self) -> &Arc<ThemeContext> {
        &self.context
    }

    /// Canonical derived theme locations.
    #[must_use]
    pub const fn paths(&self) -> &UnmanagedPaths {
        self.decision.paths()
    }

    /// API routing in use.
    #[must_use]
    pub const fn dispatcher(&self) -> &VersionDispatcher {
        &self.dispatcher
    }

    /// What: Check that the configured theme files can be used.
    ///
    /// # Errors
    /// Returns `ThemeError::Precondition` naming the first failing check.
    pub fn validate(&self) -> Result<()> {
        self.decision.check_preconditions()?;
        Ok(())
    }

    /// What: Decide whether `target` must be applied; see [`ThemeDecisionEngine::needs_update`].
    #[must_use]
    pub fn needs_update(&self, target: Theme, skip_check: bool) -> bool {
        let state = self.context.lock();
        self.decision.needs_update(&state.tracker, target, skip_check)
    }

    /// What: Derive, patch and apply the configured theme for `target`.
    ///
    /// Inputs:
    /// - `target`: Variant to switch to.
    ///
    /// Details:
    /// - Requests energy saver suspension and, with monitoring active, pauses the
    ///   monitor for [`MONITOR_GRACE`] first.
    /// - The derived copy gets an internal display name and variant color weights
    ///   so it never collides with the user's own theme.
    /// - Failures are logged; the tracker then keeps its previous value.
    pub fn apply_theme(&self, target: Theme) {
        self.services
            .power
            .request_disable_energy_saver(&self.config);
        if self.config.monitor_active_theme
            && let Some(monitor) = &self.services.monitor
        {
            monitor.pause(MONITOR_GRACE);
        }

        let Some(source) = self.config.theme_path(target) else {
            tracing::error!(theme = %target, "no theme file configured");
            return;
        };
        let target_path = self.paths().for_theme(target);

        let mut state = self.context.lock();
        let mut descriptor = match self.services.files.derive_unmanaged(source, target_path) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(theme = %target, error = %e, "could not derive unmanaged theme");
                return;
            }
        };
        descriptor.original_display_name = std::mem::take(&mut descriptor.display_name);
        descriptor.display_name = target.unmanaged_display_name().to_string();
        if let Err(e) = self
            .services
            .files
            .patch_colors_and_save(&descriptor, target.color_weights())
        {
            tracing::error!(theme = %target, error = %e, "could not patch unmanaged theme");
            return;
        }
        tracing::debug!(
            theme = %target,
            original = %descriptor.original_display_name,
            path = %descriptor.unmanaged_path.display(),
            "prepared unmanaged theme"
        );
        self.dispatcher
            .apply(&mut state, source, false, Some(&descriptor));
    }

    /// What: Apply a ready-made theme file as is.
    ///
    /// Details:
    /// - No derived copy and no color patch.
    pub fn apply_managed_theme(&self, path: &Path) {
        let mut state = self.context.lock();
        self.dispatcher.apply(&mut state, path, false, None);
    }

    /// What: Force the next decision for `target` to apply when monitoring is off.
    ///
    /// Details:
    /// - With switching enabled but `monitor_active_theme` off, user-driven theme
    ///   changes go unnoticed. If the tracker still names `target`'s derived file it
    ///   is cleared so `needs_update` does not report "already applied" forever.
    /// - No-op in every other configuration.
    pub fn enforce_no_monitor_updates(&self, target: Theme) {
        let mut state = self.context.lock();
        if self.config.enabled
            && !self.config.monitor_active_theme
            && state.tracker.matches(self.paths().for_theme(target))
        {
            tracing::debug!("enforcing theme refresh with disabled theme monitor");
            state.tracker.invalidate();
        }
    }

    /// What: Display name of the active theme as reported by the OS; empty on failure.
    #[must_use]
    pub fn current_theme_name(&self) -> String {
        self.dispatcher.legacy().query_current_display_name()
    }

    /// What: Visual style file name of the active theme; empty on failure.
    #[must_use]
    pub fn current_visual_style(&self) -> String {
        self.dispatcher.legacy().query_current_visual_style()
    }
}
