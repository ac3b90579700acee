use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::services::{ThemeDocument, decode_theme_bytes};
use crate::switcher::{LegacyThemeApi, ModernThemeApi, THEME_EXTENSION};

/// What: Installed themes, looked up by display name.
///
/// Details:
/// - Scans the given directories (non-recursively) for `.theme` files on every
///   lookup, so freshly written files are found as soon as they exist.
#[derive(Clone, Debug, Default)]
pub struct ThemeCatalog {
    /// Directories holding installed theme files.
    dirs: Vec<PathBuf>,
}

impl ThemeCatalog {
    /// Catalog over `dirs`.
    #[must_use]
    pub const fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// What: Find the installed theme file whose display name is `name`.
    ///
    /// Output:
    /// - First match in directory order; `None` when no file carries the name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.dirs.iter().find_map(|dir| find_in_dir(dir, name))
    }
}

/// Search one directory for a theme file named `name`.
fn find_in_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(THEME_EXTENSION))
        })
        .collect();
    candidates.sort();
    candidates.into_iter().find(|p| {
        fs::read(p)
            .ok()
            .map(|bytes| decode_theme_bytes(&bytes))
            .is_some_and(|text| ThemeDocument::parse(&text).display_name() == Some(name))
    })
}

/// What: Name-based theme switching on top of a path-based backend.
///
/// Details:
/// - Resolves the display name through a [`ThemeCatalog`] and applies the match.
/// - An unknown name is accepted without applying anything, reported as
///   "not found".
pub struct CatalogModernApi {
    /// Installed themes.
    catalog: ThemeCatalog,
    /// Applies the resolved file.
    applier: Arc<dyn LegacyThemeApi>,
}

impl CatalogModernApi {
    /// Build over a catalog and a path-based backend.
    #[must_use]
    pub fn new(catalog: ThemeCatalog, applier: Arc<dyn LegacyThemeApi>) -> Self {
        Self { catalog, applier }
    }
}

impl ModernThemeApi for CatalogModernApi {
    fn set_theme(&self, display_name: &str, original_path: &Path) -> Result<bool> {
        let Some(path) = self.catalog.find(display_name) else {
            tracing::debug!(
                name = display_name,
                original = %original_path.display(),
                "theme name not in catalog"
            );
            return Ok(false);
        };
        self.applier.apply_theme(&path)?;
        Ok(true)
    }
}
