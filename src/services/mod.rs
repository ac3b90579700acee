//! Collaborators the switcher relies on but does not own.
//!
//! Each concern is a trait so the switcher can be driven with real
//! implementations in the binary and with doubles in tests.

use std::path::Path;
use std::time::Duration;

use crate::config::ThemeConfig;
use crate::error::Result;
use crate::switcher::ThemeDescriptor;

/// Energy saver suspension.
mod power;
/// Pause gate consulted by an active theme watcher.
mod monitor;
/// `.theme` file parsing and rewriting.
mod theme_file;

pub use monitor::PauseGate;
pub use power::PowercfgEnergySaver;
pub use theme_file::{IniThemeFileService, ThemeDocument, decode_theme_bytes};

/// What: Reads, derives and patches theme definition files.
pub trait ThemeFileService: Send + Sync {
    /// What: Copy `source` to `target` and describe the copy.
    ///
    /// Output:
    /// - Descriptor whose `display_name` and `original_display_name` both hold the
    ///   source's display name.
    ///
    /// # Errors
    /// Returns an error when the source cannot be read or the copy not written.
    fn derive_unmanaged(&self, source: &Path, target: &Path) -> Result<ThemeDescriptor>;

    /// What: Write the descriptor's display name and the `"R G B"` color weights
    /// into the derived file.
    ///
    /// # Errors
    /// Returns an error when the derived file cannot be rewritten.
    fn patch_colors_and_save(&self, descriptor: &ThemeDescriptor, weights: &str) -> Result<()>;

    /// What: Read the display name from a theme file.
    ///
    /// Output:
    /// - `(raw file text, display name)`.
    ///
    /// # Errors
    /// Returns `ThemeError::Parse` when the file has no usable display name.
    fn extract_display_name(&self, path: &Path) -> Result<(String, String)>;
}

/// What: Suspends OS energy saving that would block a theme change.
pub trait PowerService: Send + Sync {
    /// Fire-and-forget request; implementations log their own failures.
    fn request_disable_energy_saver(&self, config: &ThemeConfig);
}

/// What: External watcher of user-driven theme changes.
pub trait ActiveThemeMonitor: Send + Sync {
    /// Ignore theme change notifications for `duration`; best-effort.
    fn pause(&self, duration: Duration);
}
