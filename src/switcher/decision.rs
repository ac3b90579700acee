use std::path::Path;
use std::sync::Arc;

use super::tracker::ActiveThemeTracker;
use super::types::{Theme, UnmanagedPaths};
use crate::config::ThemeConfig;
use crate::error::PreconditionError;

/// Extension every configured theme file must carry.
pub const THEME_EXTENSION: &str = "theme";

/// What: Decides whether a requested theme switch actually needs applying.
///
/// Details:
/// - Pure: never mutates configuration or tracker state.
#[derive(Clone, Debug)]
pub struct ThemeDecisionEngine {
    /// Read-only configuration.
    config: Arc<ThemeConfig>,
    /// Canonical derived theme locations.
    paths: UnmanagedPaths,
}

impl ThemeDecisionEngine {
    /// Create an engine for `config` comparing against `paths`.
    #[must_use]
    pub const fn new(config: Arc<ThemeConfig>, paths: UnmanagedPaths) -> Self {
        Self { config, paths }
    }

    /// Canonical derived theme locations.
    #[must_use]
    pub const fn paths(&self) -> &UnmanagedPaths {
        &self.paths
    }

    /// What: Verify the configured theme files can be used.
    ///
    /// Output:
    /// - `Ok(())` when both paths are set, exist, and end in `.theme`.
    /// - The first failing check otherwise, in that order.
    ///
    /// # Errors
    /// Returns the first [`PreconditionError`] encountered.
    pub fn check_preconditions(&self) -> Result<(), PreconditionError> {
        let light = self.config.theme_path(Theme::Light);
        let dark = self.config.theme_path(Theme::Dark);
        let (Some(light), Some(dark)) = (light, dark) else {
            let missing = if light.is_none() {
                Theme::Light
            } else {
                Theme::Dark
            };
            return Err(PreconditionError::MissingPath(missing));
        };
        for (theme, path) in [(Theme::Dark, dark), (Theme::Light, light)] {
            if !path.exists() {
                return Err(PreconditionError::PathNotFound(theme, path.to_path_buf()));
            }
        }
        for (theme, path) in [(Theme::Dark, dark), (Theme::Light, light)] {
            if !has_theme_extension(path) {
                return Err(PreconditionError::WrongExtension(
                    theme,
                    path.to_path_buf(),
                ));
            }
        }
        Ok(())
    }

    /// What: Decide whether `target` must be applied.
    ///
    /// Inputs:
    /// - `tracker`: Current tracker state (read only).
    /// - `target`: Requested variant.
    /// - `skip_check`: Apply even if the tracker says it is already active.
    ///
    /// Output:
    /// - `false` when preconditions fail (logged) or the variant is already active.
    /// - `true` otherwise.
    #[must_use]
    pub fn needs_update(
        &self,
        tracker: &ActiveThemeTracker,
        target: Theme,
        skip_check: bool,
    ) -> bool {
        if let Err(e) = self.check_preconditions() {
            tracing::error!(error = %e, "theme switch refused");
            return false;
        }
        skip_check || !tracker.matches(self.paths.for_theme(target))
    }
}

/// Whether `path` ends in `.theme`, ignoring ASCII case.
fn has_theme_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(THEME_EXTENSION))
}
