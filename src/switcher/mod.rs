//! Theme switching core.
//!
//! Decides whether a switch is needed, routes it to the legacy or the modern OS
//! theme API depending on the OS build, recovers from the modern API not
//! knowing a freshly written theme, and learns the names the OS assigns so the
//! next switch resolves directly.

/// Apartment thread runner for apartment-bound OS APIs.
pub mod apartment;
/// Backend traits for the two OS API generations.
mod api;
/// Top-level orchestration.
mod applier;
/// Lock-guarded shared state.
mod context;
/// Precondition and idempotence checks.
mod decision;
/// OS build based routing and the mitigation loop.
mod dispatch;
/// Learned display name associations.
mod learning;
/// Legacy, path-based API driver.
mod legacy;
/// Modern, name-based API driver.
mod modern;
/// Active theme tracking.
mod tracker;
/// Core value types.
mod types;

pub use api::{LegacyThemeApi, ModernThemeApi};
pub use applier::{Collaborators, MONITOR_GRACE, ThemeApplier};
pub use context::{ThemeContext, ThemeState};
pub use decision::{THEME_EXTENSION, ThemeDecisionEngine};
pub use dispatch::{MODERN_API_MIN_BUILD, SLOW_SWITCH_THRESHOLD, VersionDispatcher};
pub use learning::{LearnOutcome, NameLearningStore};
pub use legacy::LegacyApiInvoker;
pub use modern::ModernApiInvoker;
pub use tracker::ActiveThemeTracker;
pub use types::{
    ModernOutcome, Theme, ThemeDescriptor, UNMANAGED_DARK_FILE, UNMANAGED_DARK_NAME,
    UNMANAGED_LIGHT_FILE, UNMANAGED_LIGHT_NAME, UnmanagedPaths,
};
