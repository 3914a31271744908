//! Routed pages.

pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod guard;
pub mod jobs;
pub mod upload;
