//! Platform API boundary: client, wire models and errors.

pub mod client;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::ApiError;
