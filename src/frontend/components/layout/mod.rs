//! Layout components.

pub mod auth;
pub mod main;
pub mod navigation;

pub use auth::AuthLayout;
pub use main::Layout;
pub use navigation::Navigation;
