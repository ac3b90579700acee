use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::parse_reg_value;
use crate::error::{Result, ThemeError};
use crate::services::{IniThemeFileService, ThemeDocument, ThemeFileService, decode_theme_bytes};
use crate::switcher::LegacyThemeApi;

/// Registry key recording the active theme file.
const THEMES_KEY: &str = r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes";
/// Registry value holding the active theme file path.
const CURRENT_THEME_VALUE: &str = "CurrentTheme";
/// API label used in error reports.
const API: &str = "shell theme handler";

/// What: Path-based theme backend using the shell's theme handler.
///
/// Details:
/// - Applying runs `rundll32 themecpl.dll,OpenThemeAction <file>`, the same entry
///   point Explorer uses when a `.theme` file is opened.
/// - The active theme is read from the `CurrentTheme` registry value.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShellLegacyApi;

impl ShellLegacyApi {
    /// What: Path of the theme file the OS reports as active.
    fn current_theme_path() -> Result<PathBuf> {
        let output = Command::new("reg")
            .args(["query", THEMES_KEY, "/v", CURRENT_THEME_VALUE])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| ThemeError::api(API, e))?;
        if !output.status.success() {
            return Err(ThemeError::api(
                API,
                format!("reg query exited with {:?}", output.status.code()),
            ));
        }
        let text = String::from_utf8_lossy(&output.stdout);
        parse_reg_value(&text, CURRENT_THEME_VALUE)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| ThemeError::api(API, "no CurrentTheme value"))
    }
}

impl LegacyThemeApi for ShellLegacyApi {
    fn apply_theme(&self, path: &Path) -> Result<()> {
        let status = Command::new("rundll32.exe")
            .arg("themecpl.dll,OpenThemeAction")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ThemeError::api(API, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(ThemeError::api(
                API,
                format!("rundll32 exited with {:?}", status.code()),
            ))
        }
    }

    fn current_theme_name(&self) -> Result<String> {
        let path = Self::current_theme_path()?;
        IniThemeFileService
            .extract_display_name(&path)
            .map(|(_, name)| name)
    }

    fn current_visual_style(&self) -> Result<String> {
        let path = Self::current_theme_path()?;
        let bytes = std::fs::read(&path).map_err(|e| ThemeError::io(&path, e))?;
        ThemeDocument::parse(&decode_theme_bytes(&bytes))
            .get("VisualStyles", "Path")
            .map(super::expand_env)
            .ok_or_else(|| ThemeError::Parse {
                path,
                reason: "missing [VisualStyles] Path".to_string(),
            })
    }
}
