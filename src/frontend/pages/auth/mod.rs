//! Sign-in and registration pages.

pub mod login;
pub mod register;

pub use login::Login;
pub use register::Register;
