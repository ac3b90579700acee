//! Recording doubles for the OS backends and collaborators.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use duskswitch::config::ThemeConfig;
use duskswitch::error::{Result, ThemeError};
use duskswitch::services::{ActiveThemeMonitor, IniThemeFileService, PowerService};
use duskswitch::switcher::{
    Collaborators, LegacyApiInvoker, LegacyThemeApi, ModernApiInvoker, ModernThemeApi,
    NameLearningStore, ThemeApplier, ThemeContext, UnmanagedPaths, VersionDispatcher,
};

/// Build below the modern API threshold.
pub const LEGACY_BUILD: u32 = 19045;
/// Build with the modern API.
pub const MODERN_BUILD: u32 = 22631;

/// Legacy backend recording every applied path.
#[derive(Default)]
pub struct RecordingLegacy {
    /// Paths passed to `apply_theme`, in order.
    pub applied: Mutex<Vec<PathBuf>>,
    /// Name reported by `current_theme_name`.
    pub os_name: Mutex<String>,
    /// Number of name queries.
    pub name_queries: AtomicUsize,
    /// Fail every apply.
    pub fail_apply: bool,
}

impl RecordingLegacy {
    /// Backend reporting `name` as the active theme.
    pub fn reporting(name: &str) -> Self {
        Self {
            os_name: Mutex::new(name.to_string()),
            ..Self::default()
        }
    }

    /// Snapshot of applied paths.
    pub fn applied(&self) -> Vec<PathBuf> {
        self.applied.lock().expect("applied lock").clone()
    }

    /// Change the reported active theme name.
    pub fn set_os_name(&self, name: &str) {
        *self.os_name.lock().expect("name lock") = name.to_string();
    }
}

impl LegacyThemeApi for RecordingLegacy {
    fn apply_theme(&self, path: &Path) -> Result<()> {
        if self.fail_apply {
            return Err(ThemeError::api("legacy", "E_FAIL"));
        }
        self.applied
            .lock()
            .expect("applied lock")
            .push(path.to_path_buf());
        Ok(())
    }

    fn current_theme_name(&self) -> Result<String> {
        self.name_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.os_name.lock().expect("name lock").clone())
    }

    fn current_visual_style(&self) -> Result<String> {
        Ok(r"C:\Windows\resources\Themes\Aero\Aero.msstyles".to_string())
    }
}

/// Modern backend resolving only names it was told about.
#[derive(Default)]
pub struct RecordingModern {
    /// Names `set_theme` resolves.
    pub known: Mutex<HashSet<String>>,
    /// Names passed to `set_theme`, in order.
    pub calls: Mutex<Vec<String>>,
    /// Fail every call.
    pub fail: bool,
}

impl RecordingModern {
    /// Backend that resolves each of `names`.
    pub fn knowing(names: &[&str]) -> Self {
        Self {
            known: Mutex::new(names.iter().map(|n| (*n).to_string()).collect()),
            ..Self::default()
        }
    }

    /// Snapshot of requested names.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Make `name` resolvable.
    pub fn learn_name(&self, name: &str) {
        self.known
            .lock()
            .expect("known lock")
            .insert(name.to_string());
    }
}

impl ModernThemeApi for RecordingModern {
    fn set_theme(&self, display_name: &str, _original_path: &Path) -> Result<bool> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(display_name.to_string());
        if self.fail {
            return Err(ThemeError::api("modern", "0x80004005"));
        }
        Ok(self.known.lock().expect("known lock").contains(display_name))
    }
}

/// Power service counting requests.
#[derive(Default)]
pub struct CountingPower {
    /// Number of requests.
    pub requests: AtomicUsize,
}

impl PowerService for CountingPower {
    fn request_disable_energy_saver(&self, _config: &ThemeConfig) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// Monitor recording pause requests.
#[derive(Default)]
pub struct RecordingMonitor {
    /// Durations passed to `pause`.
    pub pauses: Mutex<Vec<Duration>>,
}

impl ActiveThemeMonitor for RecordingMonitor {
    fn pause(&self, duration: Duration) {
        self.pauses.lock().expect("pauses lock").push(duration);
    }
}

/// Write a UTF-8 theme file named `file` with display name `name` into `dir`.
pub fn write_theme(dir: &Path, file: &str, name: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(
        &path,
        format!("[Theme]\r\nDisplayName={name}\r\n\r\n[Control Panel\\Colors]\r\nBackground=1 2 3\r\n"),
    )
    .expect("write theme");
    path
}

/// Fully wired applier over recording doubles.
pub struct Harness {
    /// Keeps the temporary directory alive.
    pub dir: tempfile::TempDir,
    /// System under test.
    pub applier: ThemeApplier,
    /// Legacy backend double.
    pub legacy: Arc<RecordingLegacy>,
    /// Modern backend double.
    pub modern: Arc<RecordingModern>,
    /// Power double.
    pub power: Arc<CountingPower>,
    /// Monitor double.
    pub monitor: Arc<RecordingMonitor>,
    /// Configured light theme file.
    pub light: PathBuf,
    /// Configured dark theme file.
    pub dark: PathBuf,
}

/// Builder for [`Harness`].
pub struct HarnessBuilder {
    /// OS build the dispatcher routes for.
    build: u32,
    /// Legacy backend double.
    legacy: RecordingLegacy,
    /// Modern backend double.
    modern: RecordingModern,
    /// Adjusts the configuration after paths are filled in.
    configure: Box<dyn FnOnce(&mut ThemeConfig)>,
    /// Backing file for the learning store, relative to the temp dir.
    learned_file: Option<&'static str>,
}

impl HarnessBuilder {
    /// Start from defaults for `build`.
    pub fn new(build: u32) -> Self {
        Self {
            build,
            legacy: RecordingLegacy::default(),
            modern: RecordingModern::default(),
            configure: Box::new(|_| {}),
            learned_file: None,
        }
    }

    /// Use `legacy` as the legacy backend.
    pub fn legacy(mut self, legacy: RecordingLegacy) -> Self {
        self.legacy = legacy;
        self
    }

    /// Use `modern` as the modern backend.
    pub fn modern(mut self, modern: RecordingModern) -> Self {
        self.modern = modern;
        self
    }

    /// Adjust the configuration.
    pub fn configure(mut self, f: impl FnOnce(&mut ThemeConfig) + 'static) -> Self {
        self.configure = Box::new(f);
        self
    }

    /// Persist learned names to `file` inside the temp dir.
    pub fn learned_file(mut self, file: &'static str) -> Self {
        self.learned_file = Some(file);
        self
    }

    /// Wire everything up.
    pub fn build(self) -> Harness {
        let dir = tempfile::tempdir().expect("tempdir");
        let light = write_theme(dir.path(), "day.theme", "Day");
        let dark = write_theme(dir.path(), "night.theme", "Night");
        let mut config = ThemeConfig {
            light_theme_path: Some(light.clone()),
            dark_theme_path: Some(dark.clone()),
            ..ThemeConfig::default()
        };
        (self.configure)(&mut config);

        let learned = self.learned_file.map_or_else(NameLearningStore::in_memory, |f| {
            NameLearningStore::load(&dir.path().join(f))
        });
        let legacy = Arc::new(self.legacy);
        let modern = Arc::new(self.modern);
        let power = Arc::new(CountingPower::default());
        let monitor = Arc::new(RecordingMonitor::default());

        let files = Arc::new(IniThemeFileService);
        let dispatcher = VersionDispatcher::new(
            self.build,
            LegacyApiInvoker::new(legacy.clone()),
            ModernApiInvoker::new(modern.clone()),
            files.clone(),
        );
        let services = Collaborators {
            files,
            power: power.clone(),
            monitor: Some(monitor.clone()),
        };
        let applier = ThemeApplier::new(
            Arc::new(config),
            Arc::new(ThemeContext::new(learned)),
            UnmanagedPaths::in_dir(&dir.path().join("unmanaged")),
            dispatcher,
            services,
        );
        Harness {
            dir,
            applier,
            legacy,
            modern,
            power,
            monitor,
            light,
            dark,
        }
    }
}
