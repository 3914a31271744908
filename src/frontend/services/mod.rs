//! Frontend services: authentication context and view state.

pub mod context;
pub mod states;
