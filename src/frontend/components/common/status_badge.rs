//! Job status badge.

use crate::backend::api::models::JobStatus;
use dioxus::prelude::*;

#[component]
pub fn StatusBadge(status: JobStatus) -> Element {
    let label = status.label();

    rsx! {
        span { class: status.badge_class(), "{label}" }
    }
}
