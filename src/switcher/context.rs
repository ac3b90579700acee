use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::learning::NameLearningStore;
use super::tracker::ActiveThemeTracker;

/// What: Mutable switcher state guarded by [`ThemeContext`].
#[derive(Debug, Default)]
pub struct ThemeState {
    /// Theme file believed to be active.
    pub tracker: ActiveThemeTracker,
    /// Learned file-name to OS-name associations.
    pub learned: NameLearningStore,
}

/// What: Process-wide, lock-guarded state shared by every apply.
///
/// Details:
/// - One mutex covers both the tracker and the learning store. Apply paths hold
///   the guard from derivation until the tracker update so concurrent applies
///   never interleave their read-modify-write, and so the fixed unmanaged files
///   are never rewritten by two applies at once.
/// - Short queries lock only for the duration of the read.
#[derive(Debug, Default)]
pub struct ThemeContext {
    /// Guarded state.
    state: Mutex<ThemeState>,
}

impl ThemeContext {
    /// What: Create a context around an already loaded learning store.
    #[must_use]
    pub fn new(learned: NameLearningStore) -> Self {
        Self {
            state: Mutex::new(ThemeState {
                tracker: ActiveThemeTracker::default(),
                learned,
            }),
        }
    }

    /// What: Acquire the state lock.
    ///
    /// Details:
    /// - A poisoned lock is recovered; the state is plain data and stays usable.
    pub fn lock(&self) -> MutexGuard<'_, ThemeState> {
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            tracing::warn!("theme state lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Theme path currently recorded as active.
    #[must_use]
    pub fn active_path(&self) -> Option<PathBuf> {
        self.lock().tracker.current().map(std::path::Path::to_path_buf)
    }

    /// Forget the active theme.
    pub fn invalidate(&self) {
        self.lock().tracker.invalidate();
    }

    /// Sorted snapshot of the learned name associations.
    #[must_use]
    pub fn learned_names(&self) -> Vec<(String, String)> {
        self.lock().learned.entries()
    }
}
