use std::fs;
use std::path::{Path, PathBuf};

use super::parsing::{parse_bool, path_value, split_entry, strip_inline_comment};
use crate::switcher::Theme;

/// Skeleton settings file written on first run.
pub(crate) const SKELETON_SETTINGS_CONTENT: &str = "# duskswitch settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments.\n\
#\n\
# Theme files (.theme) used for the light and dark appearance\n\
light_theme_path =\n\
dark_theme_path =\n\
#\n\
# Switch the Windows theme at all\n\
enabled = true\n\
#\n\
# Watch for theme changes made outside duskswitch\n\
monitor_active_theme = true\n\
#\n\
# Suspend energy saver while switching (it blocks theme changes on battery)\n\
disable_energy_saver = false\n\
#\n\
# Where derived theme copies are written (empty = platform default)\n\
unmanaged_theme_dir =\n";

/// What: Theme switching configuration, read-only to the switcher.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ThemeConfig {
    /// Theme file used for the light appearance.
    pub light_theme_path: Option<PathBuf>,
    /// Theme file used for the dark appearance.
    pub dark_theme_path: Option<PathBuf>,
    /// Whether theme switching is enabled.
    pub enabled: bool,
    /// Whether an external monitor watches for user-driven theme changes.
    pub monitor_active_theme: bool,
    /// Request energy saver suspension before switching.
    pub disable_energy_saver: bool,
    /// Override for the derived theme directory.
    pub unmanaged_theme_dir: Option<PathBuf>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light_theme_path: None,
            dark_theme_path: None,
            enabled: true,
            monitor_active_theme: true,
            disable_energy_saver: false,
            unmanaged_theme_dir: None,
        }
    }
}

impl ThemeConfig {
    /// Configured source theme file for `theme`, if any.
    #[must_use]
    pub fn theme_path(&self, theme: Theme) -> Option<&Path> {
        match theme {
            Theme::Light => self.light_theme_path.as_deref(),
            Theme::Dark => self.dark_theme_path.as_deref(),
        }
    }

    /// What: Parse settings from `key = value` text.
    ///
    /// Inputs:
    /// - `content`: Settings file text.
    ///
    /// Output:
    /// - Configuration with defaults for every key not present or invalid.
    ///
    /// Details:
    /// - Empty path values count as unset.
    /// - Unknown keys are ignored; invalid booleans are logged and ignored.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut out = Self::default();
        for line in content.lines() {
            let Some((key, val)) = split_entry(line) else {
                continue;
            };
            match key.as_str() {
                "light_theme_path" | "light_theme" => out.light_theme_path = non_empty_path(val),
                "dark_theme_path" | "dark_theme" => out.dark_theme_path = non_empty_path(val),
                "unmanaged_theme_dir" => out.unmanaged_theme_dir = non_empty_path(val),
                "enabled" | "windows_theme_enabled" => set_bool(&key, val, &mut out.enabled),
                "monitor_active_theme" => set_bool(&key, val, &mut out.monitor_active_theme),
                "disable_energy_saver" => set_bool(&key, val, &mut out.disable_energy_saver),
                _ => {}
            }
        }
        out
    }
}

/// Clean a path value, treating blank values as unset.
fn non_empty_path(val: &str) -> Option<PathBuf> {
    let v = path_value(val);
    (!v.is_empty()).then(|| PathBuf::from(v))
}

/// Assign a parsed boolean, logging values that are not booleans.
fn set_bool(key: &str, val: &str, slot: &mut bool) {
    let val = strip_inline_comment(val);
    match parse_bool(val) {
        Some(b) => *slot = b,
        None => tracing::warn!(key, value = val, "ignoring invalid boolean setting"),
    }
}

/// What: Load settings from `path`, writing a skeleton when the file is missing.
///
/// Inputs:
/// - `path`: Settings file location.
///
/// Output:
/// - Parsed configuration; defaults when the file cannot be read.
pub fn load_config(path: &Path) -> ThemeConfig {
    if !path.exists() {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, SKELETON_SETTINGS_CONTENT) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote default settings skeleton"),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to write default settings skeleton"
            ),
        }
    }
    match fs::read_to_string(path) {
        Ok(content) => {
            let cfg = ThemeConfig::parse(&content);
            tracing::debug!(path = %path.display(), ?cfg, "loaded settings");
            cfg
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings; using defaults");
            ThemeConfig::default()
        }
    }
}
