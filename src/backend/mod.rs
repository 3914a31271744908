//! Backend of the application: API access, services and utilities.

pub mod api;
pub mod services;
pub mod utils;
