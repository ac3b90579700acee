use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};

/// What: Outcome of recording a name association.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LearnOutcome {
    /// The file-derived name had no association yet.
    Inserted,
    /// An existing association was overwritten.
    Updated,
}

/// What: Persistent map from a file-derived display name to the name the OS assigned.
///
/// Details:
/// - Grows only through [`NameLearningStore::learn`]; the last observed name wins.
/// - Backed by a JSON object on disk when created with [`NameLearningStore::load`].
/// - Mutated only while the owning [`super::ThemeContext`] lock is held.
#[derive(Debug, Default)]
pub struct NameLearningStore {
    /// File-derived name to OS-reported name.
    names: HashMap<String, String>,
    /// Backing file; `None` keeps the store in memory only.
    path: Option<PathBuf>,
    /// Set when `names` changed since the last successful flush.
    dirty: bool,
}

impl NameLearningStore {
    /// What: Create an empty, memory-only store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// What: Load the store from `path`, starting empty when unavailable.
    ///
    /// Inputs:
    /// - `path`: JSON file holding a `{ "file name": "os name" }` object.
    ///
    /// Output:
    /// - Store bound to `path` so later flushes write back to it.
    ///
    /// Details:
    /// - A missing file is normal on first run.
    /// - A corrupt file is logged and ignored; it is overwritten on the next flush.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let names = match fs::read_to_string(path) {
            Ok(s) => match serde_json::from_str::<HashMap<String, String>>(&s) {
                Ok(map) => {
                    tracing::debug!(
                        path = %path.display(),
                        entries = map.len(),
                        "[Learning] Loaded learned theme names"
                    );
                    map
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "[Learning] Ignoring corrupt learned theme names file"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "[Learning] Failed to read learned theme names"
                );
                HashMap::new()
            }
        };
        Self {
            names,
            path: Some(path.to_path_buf()),
            dirty: false,
        }
    }

    /// What: Record that `file_name` is known to the OS as `os_name`.
    ///
    /// Output:
    /// - Whether the association was new or replaced an older one.
    pub fn learn(&mut self, file_name: &str, os_name: &str) -> LearnOutcome {
        let previous = self
            .names
            .insert(file_name.to_string(), os_name.to_string());
        self.dirty = true;
        if previous.is_some() {
            tracing::debug!("updated theme name association: {file_name}={os_name}");
            LearnOutcome::Updated
        } else {
            tracing::debug!("learned new theme name association: {file_name}={os_name}");
            LearnOutcome::Inserted
        }
    }

    /// Name the OS is known to use for `file_name`, if learned.
    #[must_use]
    pub fn resolve(&self, file_name: &str) -> Option<&str> {
        self.names.get(file_name).map(String::as_str)
    }

    /// Number of learned associations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been learned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// What: Snapshot of all associations sorted by file-derived name.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .names
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        out.sort();
        out
    }

    /// What: Persist the store to its backing file if marked dirty.
    ///
    /// Output:
    /// - Writes JSON to the backing path and clears the dirty flag on success.
    ///
    /// Details:
    /// - No-op for memory-only stores or when nothing changed.
    /// - Failures are logged; the dirty flag stays set so the next flush retries.
    pub fn maybe_flush(&mut self) {
        if !self.dirty {
            return;
        }
        let Some(path) = self.path.as_ref() else {
            self.dirty = false;
            return;
        };
        match write_names(path, &self.names) {
            Ok(bytes) => {
                tracing::debug!(
                    path = %path.display(),
                    bytes,
                    "[Learning] Learned theme names persisted"
                );
                self.dirty = false;
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "[Learning] Failed to persist learned theme names"
                );
            }
        }
    }
}

/// What: Serialize `names` as JSON into `path`, creating its directory.
///
/// Output:
/// - Number of bytes written.
///
/// # Errors
/// Returns `ThemeError::Json` or `ThemeError::Io` on failure.
fn write_names(path: &Path, names: &HashMap<String, String>) -> Result<usize> {
    let s = serde_json::to_string_pretty(names)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| ThemeError::io(dir, e))?;
    }
    fs::write(path, &s).map_err(|e| ThemeError::io(path, e))?;
    Ok(s.len())
}
