//! Library entry for duskswitch exposing the theme switching core for the binary and integration tests.

pub mod config;
pub mod error;
pub mod services;
pub mod switcher;
pub mod system;
