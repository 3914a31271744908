//! Frontend of the dashboard: pages, components and view state.

pub mod components;
pub mod pages;
pub mod services;
