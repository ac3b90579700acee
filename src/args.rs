//! Command-line argument definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use duskswitch::switcher::Theme;

/// duskswitch - switch the Windows desktop between a light and a dark theme
#[derive(Parser, Debug)]
#[command(name = "duskswitch")]
#[command(version)]
#[command(about = "Switch the Windows desktop between a light and a dark theme", long_about = None)]
pub struct Args {
    /// Settings file to use (default: <config dir>/settings.conf)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Actions supported by the binary.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply the configured light or dark theme
    Apply {
        /// Theme to switch to (light or dark)
        theme: Theme,
        /// Apply even if the theme is already active
        #[arg(short, long)]
        force: bool,
    },
    /// Apply a theme file as is, without deriving a copy
    ApplyFile {
        /// Path to a .theme file
        path: PathBuf,
    },
    /// Print the active theme as reported by the OS
    Current,
    /// Print learned theme name associations
    Learned,
}

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`.
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}
