use std::path::Path;

use crate::error::Result;

/// What: Path-based theme API available on every supported OS build.
///
/// Details:
/// - Implementations are apartment bound; the invokers only call them from the
///   dedicated apartment thread.
pub trait LegacyThemeApi: Send + Sync {
    /// Apply the theme file at `path`.
    ///
    /// # Errors
    /// Returns an error when the OS rejects the theme or the call fails.
    fn apply_theme(&self, path: &Path) -> Result<()>;

    /// Display name of the theme the OS currently reports as active.
    ///
    /// # Errors
    /// Returns an error when the active theme cannot be queried.
    fn current_theme_name(&self) -> Result<String>;

    /// Visual style file name (e.g. `aero.msstyles`) of the active theme.
    ///
    /// # Errors
    /// Returns an error when the active theme cannot be queried.
    fn current_visual_style(&self) -> Result<String>;
}

/// What: Name-based theme API introduced with newer OS builds.
pub trait ModernThemeApi: Send + Sync {
    /// What: Switch to the installed theme called `display_name`.
    ///
    /// Inputs:
    /// - `display_name`: Name to look up among the installed themes.
    /// - `original_path`: The user's configured theme file, for diagnostics.
    ///
    /// Output:
    /// - `Ok(true)` when the name was found and applied.
    /// - `Ok(false)` when the call was accepted but the name is not known yet.
    ///
    /// # Errors
    /// Returns an error when the call itself fails.
    fn set_theme(&self, display_name: &str, original_path: &Path) -> Result<bool>;
}
