//! Utility modules for the dashboard backend.
//!
//! Settings, paths, display formatting, stylesheets and routing.

/// Application settings.
pub mod config;
/// Embedded stylesheet loading.
pub mod css;
/// Display formatting for API values.
pub mod formatter;
/// Path utilities for the application directory.
pub mod paths;
/// Application routing system.
pub mod route;
