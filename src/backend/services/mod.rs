//! Core services.

pub mod dashboard;
pub mod session;

pub use dashboard::{LoadOptions, load_dashboard};
pub use session::Session;
