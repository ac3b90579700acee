//! Configuration for duskswitch.
//!
//! Settings live in a `key = value` file under the configuration directory.
//! The switcher only ever reads them.

/// Configuration parsing utilities.
mod parsing;
/// Path resolution for config, log and data files.
mod paths;
/// Settings file loading.
mod settings;

pub use paths::{config_dir, default_unmanaged_dir, learned_names_path, logs_dir, settings_path};
pub use settings::{ThemeConfig, load_config};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests.
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
///
/// Details:
/// - Callers lock it before changing environment variables read by path helpers.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
