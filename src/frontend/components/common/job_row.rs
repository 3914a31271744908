//! Navigable job summary row.

use crate::backend::utils::route::Route;
use crate::frontend::components::common::StatusBadge;
use crate::frontend::services::states::JobRowModel;
use dioxus::prelude::*;
use dioxus_router::Link;

#[component]
pub fn JobRow(row: JobRowModel) -> Element {
    let JobRowModel {
        id,
        name,
        job_type,
        status,
        submitted,
    } = row;

    rsx! {
        Link { class: "job-row", to: Route::JobDetails { job_id: id },
            div {
                h3 { "{name}" }
                p { class: "job-type", "{job_type}" }
            }
            div { class: "job-meta",
                StatusBadge { status }
                p { class: "job-date", "{submitted}" }
            }
        }
    }
}
