//! OS backends for the theme APIs.
//!
//! On Windows the path-based API goes through the shell theme handler and the
//! name-based API resolves names against the installed themes folders. Other
//! platforms get a backend that reports every call as unsupported.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, ThemeError};
use crate::switcher::{LegacyThemeApi, ModernThemeApi};

/// Installed theme lookup by display name.
mod catalog;
/// Windows shell backend.
#[cfg(windows)]
mod shell;

pub use catalog::{CatalogModernApi, ThemeCatalog};
#[cfg(windows)]
pub use shell::ShellLegacyApi;

/// What: Read the running OS build number.
///
/// Output:
/// - The build number (e.g. `22631`); `0` when unknown or not on Windows.
#[cfg(windows)]
#[must_use]
pub fn os_build() -> u32 {
    use windows_sys::Wdk::System::SystemServices::RtlGetVersion;
    use windows_sys::Win32::System::SystemInformation::OSVERSIONINFOW;

    // SAFETY: OSVERSIONINFOW is plain data; all-zero is a valid value.
    let mut info: OSVERSIONINFOW = unsafe { std::mem::zeroed() };
    info.dwOSVersionInfoSize = u32::try_from(std::mem::size_of::<OSVERSIONINFOW>()).unwrap_or(0);
    // SAFETY: `info` is a properly sized, writable OSVERSIONINFOW.
    let status = unsafe { RtlGetVersion(&raw mut info) };
    if status == 0 { info.dwBuildNumber } else { 0 }
}

/// What: Read the running OS build number.
///
/// Output:
/// - Always `0` outside Windows, which selects the legacy path.
#[cfg(not(windows))]
#[must_use]
pub const fn os_build() -> u32 {
    0
}

/// What: Path-based backend for the running platform.
#[must_use]
pub fn legacy_api() -> Arc<dyn LegacyThemeApi> {
    #[cfg(windows)]
    {
        Arc::new(ShellLegacyApi)
    }
    #[cfg(not(windows))]
    {
        Arc::new(UnsupportedThemeApi)
    }
}

/// What: Name-based backend for the running platform.
///
/// Inputs:
/// - `extra_dirs`: Additional directories to search for installed themes, e.g. the
///   directory derived theme copies are written to.
#[must_use]
pub fn modern_api(extra_dirs: &[PathBuf]) -> Arc<dyn ModernThemeApi> {
    let mut dirs = installed_theme_dirs();
    for dir in extra_dirs {
        if !dirs.contains(dir) {
            dirs.push(dir.clone());
        }
    }
    Arc::new(CatalogModernApi::new(ThemeCatalog::new(dirs), legacy_api()))
}

/// What: Folders the OS installs themes into.
fn installed_theme_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        dirs.push(
            Path::new(&local)
                .join("Microsoft")
                .join("Windows")
                .join("Themes"),
        );
    }
    if let Ok(windir) = std::env::var("WINDIR") {
        dirs.push(Path::new(&windir).join("Resources").join("Themes"));
    }
    dirs
}

/// What: Backend for platforms without a theme API.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedThemeApi;

impl LegacyThemeApi for UnsupportedThemeApi {
    fn apply_theme(&self, _path: &Path) -> Result<()> {
        Err(ThemeError::Unsupported("theme application"))
    }

    fn current_theme_name(&self) -> Result<String> {
        Err(ThemeError::Unsupported("active theme query"))
    }

    fn current_visual_style(&self) -> Result<String> {
        Err(ThemeError::Unsupported("visual style query"))
    }
}

impl ModernThemeApi for UnsupportedThemeApi {
    fn set_theme(&self, _display_name: &str, _original_path: &Path) -> Result<bool> {
        Err(ThemeError::Unsupported("name-based theme switching"))
    }
}

/// What: Extract a value from `reg query` output.
///
/// Inputs:
/// - `output`: Text printed by `reg query <key> /v <name>`.
/// - `name`: Value name.
///
/// Output:
/// - The value data with `%VAR%` references expanded; `None` when absent.
#[must_use]
pub fn parse_reg_value(output: &str, name: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let mut parts = line.trim().splitn(3, "    ");
        let value_name = parts.next()?.trim();
        let kind = parts.next()?.trim();
        if !value_name.eq_ignore_ascii_case(name) || !kind.starts_with("REG_") {
            return None;
        }
        Some(expand_env(parts.next().unwrap_or("").trim()))
    })
}

/// What: Expand `%VAR%` references from the environment.
///
/// Details:
/// - Unknown variables are left as written.
#[must_use]
pub fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('%') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let var = &after[..end];
        match std::env::var(var) {
            Ok(val) if !var.is_empty() => out.push_str(&val),
            _ => {
                out.push('%');
                out.push_str(var);
                out.push('%');
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
