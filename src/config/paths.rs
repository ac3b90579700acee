use std::env;
use std::path::{Path, PathBuf};

/// Directory name used under the platform configuration root.
const APP_DIR: &str = "duskswitch";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Some(p) = non_empty_var(var) {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Read an environment variable, treating blank values as unset.
fn non_empty_var(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// What: Configuration directory for duskswitch, created on demand.
///
/// Output:
/// - `$DUSKSWITCH_CONFIG_DIR` when set.
/// - Otherwise `%APPDATA%\duskswitch` on Windows, or
///   `$XDG_CONFIG_HOME/duskswitch` (default `~/.config/duskswitch`).
pub fn config_dir() -> PathBuf {
    let dir = if let Some(p) = non_empty_var("DUSKSWITCH_CONFIG_DIR") {
        PathBuf::from(p)
    } else if cfg!(windows)
        && let Some(appdata) = non_empty_var("APPDATA")
    {
        Path::new(&appdata).join(APP_DIR)
    } else {
        xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
    };
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `<config_dir>/logs` (ensured to exist)
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Default settings file: `<config_dir>/settings.conf`.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.conf")
}

/// File persisting learned theme name associations.
pub fn learned_names_path() -> PathBuf {
    config_dir().join("learned_theme_names.json")
}

/// What: Default directory receiving the derived light/dark theme files.
///
/// Output:
/// - `%LOCALAPPDATA%\Microsoft\Windows\Themes` on Windows so the OS indexes the
///   files like any user theme; `<config_dir>/themes` elsewhere.
pub fn default_unmanaged_dir() -> PathBuf {
    if cfg!(windows)
        && let Some(local) = non_empty_var("LOCALAPPDATA")
    {
        return Path::new(&local)
            .join("Microsoft")
            .join("Windows")
            .join("Themes");
    }
    config_dir().join("themes")
}
