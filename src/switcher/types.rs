use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name of the derived light theme inside the unmanaged theme directory.
pub const UNMANAGED_LIGHT_FILE: &str = "DuskswitchUnmanagedLight.theme";
/// File name of the derived dark theme inside the unmanaged theme directory.
pub const UNMANAGED_DARK_FILE: &str = "DuskswitchUnmanagedDark.theme";
/// Display name stamped into the derived light theme.
pub const UNMANAGED_LIGHT_NAME: &str = "Duskswitch Unmanaged Light";
/// Display name stamped into the derived dark theme.
pub const UNMANAGED_DARK_NAME: &str = "Duskswitch Unmanaged Dark";

/// The two appearance variants the switcher knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Light appearance.
    Light,
    /// Dark appearance.
    Dark,
}

impl Theme {
    /// What: Color weights written into the derived theme for this variant.
    ///
    /// Output:
    /// - `"R G B"` triple consumed by the theme file service.
    ///
    /// Details:
    /// - The values differ per variant so the OS never considers the two derived
    ///   files identical.
    #[must_use]
    pub const fn color_weights(self) -> &'static str {
        match self {
            Self::Light => "0 0 1",
            Self::Dark => "0 1 0",
        }
    }

    /// Internal display name for the derived copy of this variant.
    #[must_use]
    pub const fn unmanaged_display_name(self) -> &'static str {
        match self {
            Self::Light => UNMANAGED_LIGHT_NAME,
            Self::Dark => UNMANAGED_DARK_NAME,
        }
    }

    /// Lowercase config key form, e.g. `"dark"`.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "day" => Ok(Self::Light),
            "dark" | "night" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}', expected light or dark")),
        }
    }
}

/// What: Per-apply description of a derived ("unmanaged") theme file.
///
/// Details:
/// - Created by the theme file service for a single apply and dropped afterwards.
/// - `display_name` is the internal name stamped into the file;
///   `original_display_name` keeps the user's name for logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeDescriptor {
    /// The user's configured theme file the copy was derived from.
    pub source_path: PathBuf,
    /// Location of the derived copy.
    pub unmanaged_path: PathBuf,
    /// Display name currently written into the derived copy.
    pub display_name: String,
    /// Display name the source file carried.
    pub original_display_name: String,
}

/// What: Result of a name-based switch through the modern theme API.
///
/// Details:
/// - `Resolved`: the name was known and the switch went through.
/// - `UnresolvedButAccepted`: the OS accepted the call but did not know the name,
///   typically because a freshly written theme file was not indexed yet.
/// - `Rejected`: the call itself failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModernOutcome {
    /// Name found and switch succeeded.
    Resolved,
    /// Name not found, call accepted.
    UnresolvedButAccepted,
    /// The call failed.
    Rejected,
}

impl ModernOutcome {
    /// Whether the OS reported the call itself as successful.
    #[must_use]
    pub const fn accepted(self) -> bool {
        matches!(self, Self::Resolved | Self::UnresolvedButAccepted)
    }
}

/// What: Canonical locations of the derived light and dark theme files.
///
/// Details:
/// - These are the paths the tracker is compared against for idempotence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnmanagedPaths {
    /// Derived light theme file.
    pub light: PathBuf,
    /// Derived dark theme file.
    pub dark: PathBuf,
}

impl UnmanagedPaths {
    /// What: Build the canonical paths inside `dir`.
    ///
    /// Inputs:
    /// - `dir`: Directory that holds the derived theme files.
    ///
    /// Output:
    /// - Paths using the fixed unmanaged file names.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            light: dir.join(UNMANAGED_LIGHT_FILE),
            dark: dir.join(UNMANAGED_DARK_FILE),
        }
    }

    /// Canonical derived path for `theme`.
    #[must_use]
    pub fn for_theme(&self, theme: Theme) -> &Path {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}
