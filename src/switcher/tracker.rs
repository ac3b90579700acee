use std::path::{Path, PathBuf};

/// What: Remembers which theme file the switcher believes is active.
///
/// Details:
/// - `None` means unknown; any apply is then considered necessary.
/// - Only successful apply paths and explicit invalidation change it. Callers
///   reach it through [`super::ThemeContext`], which serializes access.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveThemeTracker {
    /// Path of the theme file applied last.
    active: Option<PathBuf>,
}

impl ActiveThemeTracker {
    /// Currently recorded theme path, if known.
    #[must_use]
    pub fn current(&self) -> Option<&Path> {
        self.active.as_deref()
    }

    /// What: Check whether `path` is the recorded active theme.
    ///
    /// Output:
    /// - `false` when nothing is recorded.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.active.as_deref() == Some(path)
    }

    /// Record `path` as the active theme.
    pub fn set(&mut self, path: impl Into<PathBuf>) {
        self.active = Some(path.into());
    }

    /// Forget the active theme so the next decision treats it as stale.
    pub fn invalidate(&mut self) {
        self.active = None;
    }
}
