//! Error types shared across the theme switching core and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

use crate::switcher::Theme;

/// What: Reasons the configured theme files cannot be used for an apply.
///
/// Details:
/// - Reported by the decision engine before any OS call is made.
/// - Carries the variant whose path failed so logs point at the right setting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// The theme path for the variant is not configured or empty.
    #[error("{0} theme path is not configured")]
    MissingPath(Theme),
    /// The configured theme path does not exist on disk.
    #[error("invalid {} theme path: {}", .0, .1.display())]
    PathNotFound(Theme, PathBuf),
    /// The configured theme path does not carry the `.theme` extension.
    #[error("{} theme path must have a .theme extension: {}", .0, .1.display())]
    WrongExtension(Theme, PathBuf),
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Configuration does not allow an apply.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// A theme file could not be read as a theme definition.
    #[error("could not parse theme file {}: {reason}", .path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Human readable cause.
        reason: String,
    },

    /// An OS theme API call failed.
    #[error("{api} call failed: {reason}")]
    ApiInvocation {
        /// Which API generation reported the failure.
        api: &'static str,
        /// Human readable cause.
        reason: String,
    },

    /// The dedicated apartment thread did not complete normally.
    #[error("theme handler thread was interrupted: {0}")]
    ThreadInterrupted(String),

    /// Filesystem access failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The running platform does not provide the requested facility.
    #[error("not supported on this platform: {0}")]
    Unsupported(&'static str),
}

impl ThemeError {
    /// What: Wrap an `std::io::Error` together with the path it concerns.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// What: Build an [`ThemeError::ApiInvocation`] from any displayable cause.
    #[must_use]
    pub fn api(api: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::ApiInvocation {
            api,
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias used by fallible operations in this crate.
pub type Result<T> = std::result::Result<T, ThemeError>;
