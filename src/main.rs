//! duskswitch binary entrypoint: argument parsing, logging setup and wiring.

mod args;

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, OnceLock};

use clap::Parser;
use duskswitch::config::{self, ThemeConfig};
use duskswitch::services::{IniThemeFileService, PauseGate, PowercfgEnergySaver, ThemeFileService};
use duskswitch::switcher::{
    Collaborators, LegacyApiInvoker, ModernApiInvoker, NameLearningStore, ThemeApplier,
    ThemeContext, UnmanagedPaths, VersionDispatcher,
};
use duskswitch::system;

use crate::args::{Args, Command, determine_log_level};

struct DuskswitchTimer;

impl tracing_subscriber::fmt::time::FormatTime for DuskswitchTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing, writing to `<config>/logs/duskswitch.log`.
///
/// Inputs:
/// - `level`: Fallback filter when `RUST_LOG` is not set.
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened.
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = config::logs_dir();
    log_path.push("duskswitch.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(DuskswitchTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(DuskswitchTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

/// What: Assemble the switcher from configuration and the platform backends.
fn build_applier(config: ThemeConfig) -> ThemeApplier {
    let unmanaged_dir = config
        .unmanaged_theme_dir
        .clone()
        .unwrap_or_else(config::default_unmanaged_dir);
    if let Err(e) = std::fs::create_dir_all(&unmanaged_dir) {
        tracing::warn!(path = %unmanaged_dir.display(), error = %e, "could not create theme directory");
    }
    let paths = UnmanagedPaths::in_dir(&unmanaged_dir);

    let learned = NameLearningStore::load(&config::learned_names_path());
    let context = Arc::new(ThemeContext::new(learned));

    let files: Arc<dyn ThemeFileService> = Arc::new(IniThemeFileService);
    let dispatcher = VersionDispatcher::detect(
        LegacyApiInvoker::new(system::legacy_api()),
        ModernApiInvoker::new(system::modern_api(&[unmanaged_dir])),
        Arc::clone(&files),
    );
    let services = Collaborators {
        files,
        power: Arc::new(PowercfgEnergySaver),
        monitor: Some(Arc::new(PauseGate::new())),
    };
    ThemeApplier::new(Arc::new(config), context, paths, dispatcher, services)
}

/// What: Execute the requested command.
///
/// Output:
/// - Process exit code; non-zero when the requested switch did not take effect.
fn run(command: Command, config_path: PathBuf) -> ExitCode {
    let config = config::load_config(&config_path);
    if !config.enabled {
        tracing::info!("theme switching disabled in settings");
        if matches!(command, Command::Apply { .. }) {
            return ExitCode::SUCCESS;
        }
    }
    let applier = build_applier(config);
    tracing::debug!(
        build = applier.dispatcher().build(),
        modern = applier.dispatcher().uses_modern_api(),
        "theme API selected"
    );

    match command {
        Command::Apply { theme, force } => {
            if let Err(e) = applier.validate() {
                tracing::error!(error = %e, "theme switch refused");
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
            applier.enforce_no_monitor_updates(theme);
            if !applier.needs_update(theme, force) {
                tracing::info!(theme = %theme, "no theme switch needed");
                return ExitCode::SUCCESS;
            }
            applier.apply_theme(theme);
            if applier.context().active_path().as_deref() == Some(applier.paths().for_theme(theme))
            {
                ExitCode::SUCCESS
            } else {
                tracing::error!(theme = %theme, "theme switch not confirmed");
                ExitCode::FAILURE
            }
        }
        Command::ApplyFile { path } => {
            if !path.exists() {
                tracing::error!(path = %path.display(), "theme file does not exist");
                eprintln!("theme file not found: {}", path.display());
                return ExitCode::FAILURE;
            }
            applier.apply_managed_theme(&path);
            if applier.context().active_path().as_deref() == Some(path.as_path()) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::Current => {
            let name = applier.current_theme_name();
            let style = applier.current_visual_style();
            if name.is_empty() {
                eprintln!("could not determine the active theme");
                return ExitCode::FAILURE;
            }
            println!("{name}");
            if !style.is_empty() {
                println!("visual style: {style}");
            }
            ExitCode::SUCCESS
        }
        Command::Learned => {
            for (file_name, os_name) in applier.context().learned_names() {
                println!("{file_name} -> {os_name}");
            }
            ExitCode::SUCCESS
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&determine_log_level(&args));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "duskswitch starting");
    let config_path = args.config.clone().unwrap_or_else(config::settings_path);
    let code = run(args.command, config_path);
    tracing::info!("duskswitch exited");
    code
}
