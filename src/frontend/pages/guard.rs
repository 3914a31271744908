//! Route guard for signed-in pages.

use crate::backend::utils::route::Route;
use crate::frontend::components::layout::Layout;
use crate::frontend::services::context::{AuthState, AuthStatus};
use dioxus::prelude::*;
use dioxus_router::navigator;

/// What the guard does for a given authentication status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Status unknown: neutral placeholder, no navigation.
    Placeholder,
    /// Signed out: navigate away, render nothing protected.
    Redirect(Route),
    /// Signed in: render the protected subtree.
    Render,
}

pub fn guard_decision(status: &AuthStatus) -> GuardDecision {
    match status {
        AuthStatus::Loading => GuardDecision::Placeholder,
        AuthStatus::Unauthenticated => GuardDecision::Redirect(Route::Login {}),
        AuthStatus::Authenticated(_) => GuardDecision::Render,
    }
}

/// Layout route wrapping every protected page.
#[component]
pub fn ProtectedRoute() -> Element {
    let nav = navigator();
    let auth = use_context::<AuthState>();
    let status = auth.status;

    use_effect(move || {
        if let GuardDecision::Redirect(target) = guard_decision(&status.read()) {
            log::debug!("Not signed in, redirecting to {target}");
            nav.replace(target);
        }
    });

    match guard_decision(&status.read()) {
        GuardDecision::Placeholder => rsx! {
            div { class: "loading-placeholder guard-loading", "Loading..." }
        },
        GuardDecision::Redirect(_) => rsx! {},
        GuardDecision::Render => rsx! { Layout {} },
    }
}
